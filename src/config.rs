//! Configuración y argumentos CLI

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{NgramError, Result};

/// Orden de n-grama sobre el que actúa un comando
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NgramKind {
    Unigrams,
    Bigrams,
    Trigrams,
}

impl NgramKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "unigrams" | "unigramas" => Some(NgramKind::Unigrams),
            "bigrams" | "bigramas" => Some(NgramKind::Bigrams),
            "trigrams" | "trigramas" => Some(NgramKind::Trigrams),
            _ => None,
        }
    }
}

/// Comando a ejecutar, con sus argumentos ya validados
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Preprocess {
        input: PathBuf,
        output: PathBuf,
    },
    PreprocessBatch {
        input_dir: PathBuf,
        output_dir: PathBuf,
    },
    Tag {
        dictionary: PathBuf,
        input: PathBuf,
        output: PathBuf,
    },
    TagBatch {
        dictionary: PathBuf,
        input_dir: PathBuf,
        output_dir: PathBuf,
    },
    TagMerge {
        input_dir: PathBuf,
        output: PathBuf,
    },
    Create {
        kind: NgramKind,
        input: PathBuf,
        output: PathBuf,
        threshold: u64,
    },
    CreateBatch {
        kind: NgramKind,
        input_dir: PathBuf,
        output_dir: PathBuf,
        threshold: u64,
    },
    MergeBatch {
        kind: NgramKind,
        input_dir: PathBuf,
        output: PathBuf,
        threshold: u64,
    },
    Compare {
        first: PathBuf,
        second: PathBuf,
    },
    Filter {
        input: PathBuf,
        min: u64,
        max: u64,
    },
    Cooccurrence {
        bigrams: PathBuf,
        words: Vec<String>,
    },
    QueryTags {
        input: PathBuf,
        pattern: [String; 3],
        threshold: u64,
    },
    QueryTarget {
        input: PathBuf,
        target: String,
        candidate_threshold: u64,
        filler_threshold: u64,
        max_fillers: usize,
    },
    SearchWords {
        input: PathBuf,
        start_tag: String,
        end_tag: String,
        threshold: u64,
    },
    SearchRelations {
        input: PathBuf,
        pattern: Option<[String; 3]>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Comando a ejecutar
    pub command: Option<Command>,
    /// Hilos para los comandos de lote (default: los de rayon)
    pub jobs: Option<usize>,
    /// Registro detallado
    pub verbose: bool,
    /// Excluir trigramas con UNK en `trigrams query`
    pub skip_unknown: bool,
    /// Mostrar ayuda
    pub show_help: bool,
}

impl Config {
    pub fn from_args(args: Vec<String>) -> Result<Self> {
        let mut config = Config::default();
        let mut positional = Vec::new();
        let mut args_iter = args.into_iter().skip(1); // Skip program name

        while let Some(arg) = args_iter.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    config.show_help = true;
                    return Ok(config);
                }
                "-v" | "--verbose" => config.verbose = true,
                "--skip-unknown" => config.skip_unknown = true,
                "-j" | "--jobs" => {
                    let value = args_iter
                        .next()
                        .ok_or_else(|| argument("--jobs requiere un valor"))?;
                    let jobs: usize = value
                        .parse()
                        .map_err(|_| argument(format!("--jobs debe ser un número: {}", value)))?;
                    if jobs == 0 {
                        return Err(argument("--jobs debe ser mayor que cero"));
                    }
                    config.jobs = Some(jobs);
                }
                _ => {
                    if arg.starts_with("--") || (arg.starts_with('-') && arg.len() == 2) {
                        return Err(argument(format!("Opción desconocida: {}", arg)));
                    }
                    positional.push(arg);
                }
            }
        }

        if positional.is_empty() {
            return Err(argument("No se indicó ningún comando"));
        }
        config.command = Some(Self::parse_command(&positional)?);
        Ok(config)
    }

    fn parse_command(args: &[String]) -> Result<Command> {
        let name = args[0].as_str();

        if let Some(kind) = NgramKind::from_str(name) {
            let action = required(args, 1, "<acción>")?;
            return Self::parse_ngram_command(kind, action, &args[2..]);
        }

        let rest = &args[1..];
        let command = match name {
            "preprocess" => {
                at_most(rest, 2)?;
                Command::Preprocess {
                    input: path(rest, 0, "<entrada>")?,
                    output: path(rest, 1, "<salida>")?,
                }
            }
            "preprocess-batch" => {
                at_most(rest, 2)?;
                Command::PreprocessBatch {
                    input_dir: path(rest, 0, "<dir_entrada>")?,
                    output_dir: path(rest, 1, "<dir_salida>")?,
                }
            }
            "tag" => {
                at_most(rest, 3)?;
                Command::Tag {
                    dictionary: path(rest, 0, "<diccionario>")?,
                    input: path(rest, 1, "<entrada>")?,
                    output: path(rest, 2, "<salida>")?,
                }
            }
            "tag-batch" => {
                at_most(rest, 3)?;
                Command::TagBatch {
                    dictionary: path(rest, 0, "<diccionario>")?,
                    input_dir: path(rest, 1, "<dir_entrada>")?,
                    output_dir: path(rest, 2, "<dir_salida>")?,
                }
            }
            "tag-merge" => {
                at_most(rest, 2)?;
                Command::TagMerge {
                    input_dir: path(rest, 0, "<dir_entrada>")?,
                    output: path(rest, 1, "<salida>")?,
                }
            }
            _ => return Err(argument(format!("Comando desconocido: {}", name))),
        };
        Ok(command)
    }

    fn parse_ngram_command(kind: NgramKind, action: &str, rest: &[String]) -> Result<Command> {
        let command = match (kind, action) {
            (_, "create") => {
                at_most(rest, 3)?;
                Command::Create {
                    kind,
                    input: path(rest, 0, "<entrada>")?,
                    output: path(rest, 1, "<salida>")?,
                    threshold: optional_number(rest, 2, "<umbral>", 0)?,
                }
            }
            (_, "create-batch") => {
                at_most(rest, 3)?;
                Command::CreateBatch {
                    kind,
                    input_dir: path(rest, 0, "<dir_entrada>")?,
                    output_dir: path(rest, 1, "<dir_salida>")?,
                    threshold: optional_number(rest, 2, "<umbral>", 0)?,
                }
            }
            (_, "merge-batch") => {
                at_most(rest, 3)?;
                Command::MergeBatch {
                    kind,
                    input_dir: path(rest, 0, "<dir_entrada>")?,
                    output: path(rest, 1, "<salida>")?,
                    threshold: optional_number(rest, 2, "<umbral>", 0)?,
                }
            }
            (NgramKind::Unigrams, "compare") => {
                at_most(rest, 2)?;
                Command::Compare {
                    first: path(rest, 0, "<tabla1>")?,
                    second: path(rest, 1, "<tabla2>")?,
                }
            }
            (NgramKind::Unigrams, "filter") => {
                at_most(rest, 3)?;
                Command::Filter {
                    input: path(rest, 0, "<tabla>")?,
                    min: number(rest, 1, "<mínimo>")?,
                    max: number(rest, 2, "<máximo>")?,
                }
            }
            (NgramKind::Bigrams, "cooccurrence") => {
                let bigrams = path(rest, 0, "<tabla>")?;
                required(rest, 1, "<palabra>")?;
                Command::Cooccurrence {
                    bigrams,
                    words: rest[1..].to_vec(),
                }
            }
            (NgramKind::Trigrams, "query") => {
                at_most(rest, 5)?;
                Command::QueryTags {
                    input: path(rest, 0, "<tabla>")?,
                    pattern: [
                        string(rest, 1, "<etiqueta1>")?,
                        string(rest, 2, "<etiqueta2>")?,
                        string(rest, 3, "<etiqueta3>")?,
                    ],
                    threshold: optional_number(rest, 4, "<umbral>", 0)?,
                }
            }
            (NgramKind::Trigrams, "query-target") => {
                at_most(rest, 5)?;
                Command::QueryTarget {
                    input: path(rest, 0, "<tabla>")?,
                    target: string(rest, 1, "<etiqueta>")?,
                    candidate_threshold: number(rest, 2, "<umbral1>")?,
                    filler_threshold: number(rest, 3, "<umbral2>")?,
                    max_fillers: number(rest, 4, "<umbral3>")?,
                }
            }
            (NgramKind::Trigrams, "search-words") => {
                at_most(rest, 4)?;
                Command::SearchWords {
                    input: path(rest, 0, "<etiquetado>")?,
                    start_tag: string(rest, 1, "<etiqueta_inicial>")?,
                    end_tag: string(rest, 2, "<etiqueta_final>")?,
                    threshold: optional_number(rest, 3, "<umbral>", 0)?,
                }
            }
            (NgramKind::Trigrams, "search-relations") => {
                at_most(rest, 4)?;
                let input = path(rest, 0, "<etiquetado>")?;
                let pattern = match rest.len() {
                    1 => None,
                    4 => Some([rest[1].clone(), rest[2].clone(), rest[3].clone()]),
                    _ => {
                        return Err(argument(
                            "search-relations requiere cero o tres etiquetas",
                        ))
                    }
                };
                Command::SearchRelations { input, pattern }
            }
            _ => {
                return Err(argument(format!(
                    "Acción desconocida para {:?}: {}",
                    kind, action
                )))
            }
        };
        Ok(command)
    }

    pub fn print_help() {
        println!(
            r#"ngramas - Modelos de n-gramas y consultas de etiquetas sobre corpus en español

USO:
    ngramas [OPCIONES] <COMANDO> [ARGUMENTOS]

COMANDOS:
    preprocess <entrada> <salida>                 Limpia un texto para el etiquetador
    preprocess-batch <dir_entrada> <dir_salida>   Limpia todos los archivos de un directorio
    tag <diccionario> <entrada> <salida>          Etiqueta un texto preprocesado
    tag-batch <diccionario> <dir_entrada> <dir_salida>
    tag-merge <dir_entrada> <salida>              Concatena archivos etiquetados

    unigrams|bigrams|trigrams create <entrada> <salida> [umbral]
    unigrams|bigrams|trigrams create-batch <dir_entrada> <dir_salida> [umbral]
    unigrams|bigrams|trigrams merge-batch <dir_entrada> <salida> [umbral]

    unigrams compare <tabla1> <tabla2>            Solapamiento de frecuencias relativas
    unigrams filter <tabla> <mínimo> <máximo>     Palabras de contenido en el rango
    bigrams cooccurrence <tabla> <palabra>...     Vector de palabras funcionales previas
    trigrams query <tabla> <e1> <e2> <e3> [umbral]
                                                  Trigramas de etiquetas ('*' = comodín)
    trigrams query-target <tabla> <etiqueta> <umbral1> <umbral2> <umbral3>
                                                  Contextos estrechos de una etiqueta
    trigrams search-words <etiquetado> <inicial> <final> [umbral]
                                                  Palabras UNK entre dos etiquetas
    trigrams search-relations <etiquetado> [<e1> <e2> <e3>]
                                                  Relaciones (por defecto sustantivo-DE-sustantivo)

OPCIONES:
    -h, --help                  Muestra esta ayuda
    -j, --jobs <N>              Hilos para los comandos de lote
    -v, --verbose               Registro detallado
    --skip-unknown              En 'trigrams query', excluye trigramas con UNK

EJEMPLOS:
    ngramas bigrams create-batch corpus/ tablas/ 2
    ngramas trigrams query corpus.tritags NMS DE '*' 10
    ngramas trigrams search-relations corpus.tagged NMS DE NMS"#
        );
    }
}

fn argument(message: impl Into<String>) -> NgramError {
    NgramError::Argument(message.into())
}

fn required<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| argument(format!("Falta el argumento {}", name)))
}

fn string(args: &[String], idx: usize, name: &str) -> Result<String> {
    required(args, idx, name).map(String::from)
}

fn path(args: &[String], idx: usize, name: &str) -> Result<PathBuf> {
    required(args, idx, name).map(PathBuf::from)
}

fn number<T: FromStr>(args: &[String], idx: usize, name: &str) -> Result<T> {
    let value = required(args, idx, name)?;
    value
        .parse()
        .map_err(|_| argument(format!("{} debe ser un número: {}", name, value)))
}

fn optional_number<T: FromStr>(args: &[String], idx: usize, name: &str, default: T) -> Result<T> {
    match args.get(idx) {
        Some(_) => number(args, idx, name),
        None => Ok(default),
    }
}

fn at_most(args: &[String], max: usize) -> Result<()> {
    if args.len() > max {
        return Err(argument(format!("Sobran argumentos: {}", args[max..].join(" "))));
    }
    Ok(())
}
