//! Tests de integración: corpus crudo → preprocesado → etiquetas → trigramas → consultas.
//!
//! Ejecutar solo estos tests:  cargo test --test pipeline

use std::fs;
use std::path::Path;

use ngramas::dictionary::{TagDictionary, Tagger};
use ngramas::ngram::{
    bigram, trigram, Bigram, BigramExtractor, Extractor, FrequencyTable, Trigram,
    TrigramExtractor, Unigram, UnigramExtractor,
};
use ngramas::pipeline;
use ngramas::query::{self, TrigramPattern};
use ngramas::WordLists;

const REFERENCE: &str = "\
#NMS
rey
reino
perro
#NFS
casa
reina
#VERBO
corre
duerme
";

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_end_to_end_relations() {
    let dir = tempfile::tempdir().unwrap();
    let raw = write(
        dir.path(),
        "cronica.txt",
        "El Rey de Reino corre.\n¿Duerme el perro de la reina?\nLa casa de reina, el rey de reino.\n",
    );
    let dict_path = write(dir.path(), "referencia.txt", REFERENCE);

    let clean = dir.path().join("cronica.clean");
    pipeline::preprocess_file(&raw, &clean).unwrap();

    let lists = WordLists::spanish();
    let dictionary = TagDictionary::load_from_file(&dict_path).unwrap();
    let tagger = Tagger::new(&lists, &dictionary);
    let tagged = dir.path().join("cronica.tagged");
    assert_eq!(tagger.tag_file(&clean, &tagged).unwrap(), 3);

    let first_line = fs::read_to_string(&tagged).unwrap();
    assert!(
        first_line.starts_with("el/EL rey/NMS de/DE reino/NMS corre/VERBO ./."),
        "Etiquetado inesperado: {}",
        first_line
    );

    let relations = query::find_relations_in_file(&tagged, &["NMS", "DE", "NMS"]).unwrap();
    assert_eq!(relations.count(&bigram("rey", "reino")), 2);

    let sweep = query::noun_de_noun_relations(&tagged).unwrap();
    let nfs_nfs = sweep
        .iter()
        .find(|(p, _)| *p == ["NFS", "DE", "NFS"])
        .map(|(_, t)| t)
        .unwrap();
    assert_eq!(nfs_nfs.count(&bigram("casa", "reina")), 1);

    let trigrams = TrigramExtractor.extract_file(&tagged).unwrap();
    let hits = query::query_tag_trigrams(
        &trigrams,
        &TrigramPattern::new("NMS", "DE", "*"),
        2,
        false,
    );
    assert_eq!(hits, vec![(&trigram("NMS", "DE", "NMS"), 2)]);
}

#[test]
fn test_merge_order_does_not_matter() {
    let shards = [
        "El perro corre. El gato duerme.",
        "La casa del perro. El perro duerme.",
        "Un perro, un gato y el perro.",
    ];
    let tables: Vec<FrequencyTable<Bigram>> = shards
        .iter()
        .map(|s| BigramExtractor.extract_lines([*s]))
        .collect();
    let (a, b, c) = (tables[0].clone(), tables[1].clone(), tables[2].clone());

    let left = a.clone().merge(b.clone()).merge(c.clone());
    let right = a.clone().merge(b.clone().merge(c.clone()));
    let swapped = b.merge(a).merge(c);
    assert_eq!(left, right);
    assert_eq!(left, swapped);

    let whole = BigramExtractor.extract_lines(shards);
    assert_eq!(left, whole);
}

#[test]
fn test_batch_merge_equals_single_pass() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    let tables = dir.path().join("tablas");
    fs::create_dir(&corpus).unwrap();
    fs::create_dir(&tables).unwrap();

    let texts = [
        "El perro corre. El gato duerme.",
        "La casa del perro; el perro duerme.",
        "Según él, el perro y el gato.",
        "Nada.",
    ];
    for (i, text) in texts.iter().enumerate() {
        write(&corpus, &format!("parte{}.txt", i), text);
    }

    let report = pipeline::create_batch(&UnigramExtractor, &corpus, &tables, 0).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.processed.len(), texts.len());

    let merged_path = dir.path().join("todo.unigrams");
    pipeline::merge_batch_to_file::<Unigram>(&tables, &merged_path, 0).unwrap();
    let merged = FrequencyTable::<Unigram>::load(&merged_path).unwrap();

    let whole = UnigramExtractor.extract_lines(texts);
    assert_eq!(merged, whole);
    assert_eq!(merged.count(&"perro".to_string()), 4);
}

#[test]
fn test_merge_threshold_applies_to_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    let tables = dir.path().join("tablas");
    fs::create_dir(&tables).unwrap();
    write(&tables, "a.tritags", "[\"EL\",\"NMS\",\"DE\"]\t2\n[\"LA\",\"NFS\",\".\"]\t1\n");
    write(&tables, "b.tritags", "[\"EL\",\"NMS\",\"DE\"]\t1\n[\"LA\",\"NFS\",\"DE\"]\t1\n");

    let out = dir.path().join("todo.tritags");
    pipeline::merge_batch_to_file::<Trigram>(&tables, &out, 2).unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "[\"EL\",\"NMS\",\"DE\"]\t3\n"
    );
}

#[test]
fn test_create_batch_reports_unreadable_file_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    let tables = dir.path().join("tablas");
    fs::create_dir(&corpus).unwrap();
    fs::create_dir(&tables).unwrap();
    write(&corpus, "bueno.txt", "el perro corre");
    // Bytes que no son UTF-8: la lectura por líneas falla
    fs::write(corpus.join("roto.txt"), [0xff, 0xfe, 0x00, b'\n']).unwrap();

    let report = pipeline::create_batch(&UnigramExtractor, &corpus, &tables, 0).unwrap();
    assert_eq!(report.processed, vec![corpus.join("bueno.txt")]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, corpus.join("roto.txt"));

    let good = FrequencyTable::<Unigram>::load(tables.join("bueno.unigrams")).unwrap();
    assert_eq!(good.len(), 3);
    let broken = FrequencyTable::<Unigram>::load(tables.join("roto.unigrams")).unwrap();
    assert!(broken.is_empty());
}

#[test]
fn test_tag_batch_names() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("limpio");
    let output = dir.path().join("etiquetado");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&output).unwrap();
    write(&input, "uno.txt", "el rey corre .\n");
    write(&input, "dos.txt", "la casa\n");

    let lists = WordLists::spanish();
    let mut dictionary = TagDictionary::new();
    dictionary.insert("NMS", "rey");
    let tagger = Tagger::new(&lists, &dictionary);

    let report = pipeline::tag_batch(&tagger, &input, &output).unwrap();
    assert!(report.is_clean());
    assert_eq!(
        fs::read_to_string(output.join("uno.tagged")).unwrap(),
        "el/EL rey/NMS corre/UNK ./.\n"
    );
    assert_eq!(
        fs::read_to_string(output.join("dos.tagged")).unwrap(),
        "la/LA casa/UNK\n"
    );
}

#[test]
fn test_cooccurrence_from_corpus() {
    let bigrams = BigramExtractor.extract_lines([
        "El perro ladra. Un perro corre. El perro duerme. Del perro nada.",
    ]);
    let lists = WordLists::spanish();
    let vector = query::cooccurrence_vector("perro", lists.stopwords(), &bigrams);
    let sum: f64 = vector.iter().sum();
    assert!((sum - 1.0).abs() < 1e-9);

    let el = lists.stopwords().iter().position(|w| w == "el").unwrap();
    assert!((vector[el] - 0.5).abs() < 1e-9);

    let unseen = query::cooccurrence_vector("ballena", lists.stopwords(), &bigrams);
    assert_eq!(unseen.iter().sum::<f64>(), 0.0);
}
