use std::process;

use ngramas::config::{Command, NgramKind};
use ngramas::dictionary::{TagDictionary, Tagger};
use ngramas::error::Result;
use ngramas::ngram::{
    Bigram, BigramExtractor, BigramTable, Trigram, TrigramExtractor, TrigramTable, Unigram,
    UnigramExtractor, UnigramTable,
};
use ngramas::query::{self, TrigramPattern};
use ngramas::{pipeline, Config, WordLists};

fn main() {
    let config = match Config::from_args(std::env::args().collect()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            Config::print_help();
            process::exit(1);
        }
    };

    if config.show_help {
        Config::print_help();
        return;
    }

    init_logging(config.verbose);

    // Solo los errores de argumentos terminan el proceso con error; los
    // fallos de archivo ya quedan registrados y dejan un resultado vacío
    if let Err(e) = run(&config) {
        log::error!("{}", e);
        if e.is_fatal() {
            Config::print_help();
            process::exit(1);
        }
    }
}

/// Registro a salida estándar; `RUST_LOG` tiene prioridad sobre `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .init();
}

fn run(config: &Config) -> Result<()> {
    pipeline::configure_threads(config.jobs)?;
    let word_lists = WordLists::spanish();

    let command = match config.command {
        Some(ref command) => command,
        None => return Ok(()),
    };

    match command {
        Command::Preprocess { input, output } => {
            let lines = pipeline::preprocess_file(input, output)?;
            log::info!("Preprocesado {} ({} líneas) en {}", input.display(), lines, output.display());
        }
        Command::PreprocessBatch { input_dir, output_dir } => {
            pipeline::preprocess_batch(input_dir, output_dir)?.log_summary("preprocess-batch");
        }
        Command::Tag { dictionary, input, output } => {
            let dictionary = TagDictionary::load_from_file(dictionary)?;
            let tagger = Tagger::new(&word_lists, &dictionary);
            tagger.tag_file(input, output)?;
            log::info!("Archivo etiquetado escrito en {}", output.display());
        }
        Command::TagBatch { dictionary, input_dir, output_dir } => {
            let dictionary = TagDictionary::load_from_file(dictionary)?;
            let tagger = Tagger::new(&word_lists, &dictionary);
            pipeline::tag_batch(&tagger, input_dir, output_dir)?.log_summary("tag-batch");
        }
        Command::TagMerge { input_dir, output } => {
            pipeline::tag_merge(input_dir, output)?.log_summary("tag-merge");
        }
        Command::Create { kind, input, output, threshold } => {
            match kind {
                NgramKind::Unigrams => {
                    pipeline::create_table(&UnigramExtractor, input, output, *threshold)?;
                }
                NgramKind::Bigrams => {
                    pipeline::create_table(&BigramExtractor, input, output, *threshold)?;
                }
                NgramKind::Trigrams => {
                    pipeline::create_table(&TrigramExtractor, input, output, *threshold)?;
                }
            }
        }
        Command::CreateBatch { kind, input_dir, output_dir, threshold } => {
            let report = match kind {
                NgramKind::Unigrams => {
                    pipeline::create_batch(&UnigramExtractor, input_dir, output_dir, *threshold)?
                }
                NgramKind::Bigrams => {
                    pipeline::create_batch(&BigramExtractor, input_dir, output_dir, *threshold)?
                }
                NgramKind::Trigrams => {
                    pipeline::create_batch(&TrigramExtractor, input_dir, output_dir, *threshold)?
                }
            };
            report.log_summary("create-batch");
        }
        Command::MergeBatch { kind, input_dir, output, threshold } => {
            let report = match kind {
                NgramKind::Unigrams => {
                    pipeline::merge_batch_to_file::<Unigram>(input_dir, output, *threshold)?
                }
                NgramKind::Bigrams => {
                    pipeline::merge_batch_to_file::<Bigram>(input_dir, output, *threshold)?
                }
                NgramKind::Trigrams => {
                    pipeline::merge_batch_to_file::<Trigram>(input_dir, output, *threshold)?
                }
            };
            report.log_summary("merge-batch");
        }
        Command::Compare { first, second } => {
            let first = UnigramTable::load_or_empty(first);
            let second = UnigramTable::load_or_empty(second);
            println!("Resultado: {}", query::overlap(&first, &second));
        }
        Command::Filter { input, min, max } => {
            let table = UnigramTable::load_or_empty(input);
            for (word, count) in query::content_words_in_range(&table, *min, *max, &word_lists) {
                println!("'{}'\t{}", word, count);
            }
        }
        Command::Cooccurrence { bigrams, words } => {
            let table = BigramTable::load_or_empty(bigrams);
            for word in words {
                let vector = query::cooccurrence_vector(word, word_lists.stopwords(), &table);
                let rendered: Vec<String> = vector.iter().map(|v| format!("{:.4}", v)).collect();
                println!("{}\t[{}]", word, rendered.join(", "));
            }
        }
        Command::QueryTags { input, pattern, threshold } => {
            let table = TrigramTable::load_or_empty(input);
            let pattern = TrigramPattern::new(&pattern[0], &pattern[1], &pattern[2]);
            for (trigram, count) in
                query::query_tag_trigrams(&table, &pattern, *threshold, config.skip_unknown)
            {
                println!("{} --> total: {}", tuple(trigram), count);
            }
        }
        Command::QueryTarget {
            input,
            target,
            candidate_threshold,
            filler_threshold,
            max_fillers,
        } => {
            let table = TrigramTable::load_or_empty(input);
            let contexts = query::query_target_trigrams(
                &table,
                target,
                *candidate_threshold,
                *filler_threshold,
                *max_fillers,
            );
            for context in contexts {
                println!("{} --> total: {}", context.frame, context.count);
                for (trigram, count) in &context.fillers {
                    println!("    {}\t{}", tuple(trigram), count);
                }
            }
        }
        Command::SearchWords { input, start_tag, end_tag, threshold } => {
            let table = query::find_words_in_file(input, start_tag, end_tag)?;
            let frequent = table.filter(*threshold);
            for (word, _) in frequent.sorted() {
                println!("{}", word);
            }
        }
        Command::SearchRelations { input, pattern } => match pattern {
            Some(pattern) => {
                let tags = [pattern[0].as_str(), pattern[1].as_str(), pattern[2].as_str()];
                let table = query::find_relations_in_file(input, &tags)?;
                print_relations(&table);
            }
            None => {
                for (pattern, table) in query::noun_de_noun_relations(input)? {
                    println!("Patrón: ({}, {}, {})", pattern[0], pattern[1], pattern[2]);
                    print_relations(&table);
                }
            }
        },
    }

    Ok(())
}

fn print_relations(table: &BigramTable) {
    for (pair, count) in table.sorted() {
        println!("{}\t{}", tuple(pair), count);
    }
}

/// `(a, b, c)`
fn tuple(parts: &[String]) -> String {
    format!("({})", parts.join(", "))
}

