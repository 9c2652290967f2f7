//! Extracción de palabras y relaciones desde un corpus etiquetado
//!
//! A diferencia de las consultas sobre la tabla de trigramas, aquí se
//! recorre el corpus para recuperar las palabras de superficie.

use std::io::BufRead;
use std::path::Path;

use crate::dictionary::UNKNOWN_TAG;
use crate::error::Result;
use crate::files;
use crate::ngram::{for_each_tagged_line, BigramTable, TaggedToken, UnigramTable};

/// Etiquetas de sustantivo (masculino/femenino, singular/plural)
pub const NOUN_TAGS: &[&str] = &["NMS", "NFS", "NMP", "NFP"];

/// Etiqueta de la preposición "de"
pub const DE_TAG: &str = "DE";

/// Cuenta las palabras `UNK` encerradas entre `start_tag` y `end_tag`
pub fn words_in_sentence(
    tokens: &[TaggedToken<'_>],
    start_tag: &str,
    end_tag: &str,
    table: &mut UnigramTable,
) {
    for window in tokens.windows(3) {
        if window[0].tag == start_tag && window[1].tag == UNKNOWN_TAG && window[2].tag == end_tag {
            table.add(window[1].word.to_string());
        }
    }
}

/// Cuenta los pares (primera, tercera palabra) de las ternas que encajan exactamente
pub fn relations_in_sentence(
    tokens: &[TaggedToken<'_>],
    pattern: &[&str; 3],
    table: &mut BigramTable,
) {
    for window in tokens.windows(3) {
        if window
            .iter()
            .zip(pattern.iter())
            .all(|(token, tag)| token.tag == *tag)
        {
            table.add([window[0].word.to_string(), window[2].word.to_string()]);
        }
    }
}

/// Palabras desconocidas que aparecen en el contexto `start_tag UNK end_tag`
pub fn find_words_from_pattern<R: BufRead>(
    reader: R,
    path: &Path,
    start_tag: &str,
    end_tag: &str,
) -> Result<UnigramTable> {
    let mut table = UnigramTable::new();
    for_each_tagged_line(reader, path, |tokens| {
        words_in_sentence(tokens, start_tag, end_tag, &mut table)
    })?;
    Ok(table)
}

/// Relaciones (palabra inicial, palabra final) del patrón de tres etiquetas
pub fn find_relations_from_pattern<R: BufRead>(
    reader: R,
    path: &Path,
    pattern: &[&str; 3],
) -> Result<BigramTable> {
    let mut table = BigramTable::new();
    for_each_tagged_line(reader, path, |tokens| {
        relations_in_sentence(tokens, pattern, &mut table)
    })?;
    Ok(table)
}

pub fn find_words_in_file(path: &Path, start_tag: &str, end_tag: &str) -> Result<UnigramTable> {
    let reader = files::open_reader(path)?;
    find_words_from_pattern(reader, path, start_tag, end_tag)
}

pub fn find_relations_in_file(path: &Path, pattern: &[&str; 3]) -> Result<BigramTable> {
    let reader = files::open_reader(path)?;
    find_relations_from_pattern(reader, path, pattern)
}

/// Los 16 patrones sustantivo–DE–sustantivo
pub fn noun_de_noun_patterns() -> Vec<[&'static str; 3]> {
    let mut patterns = Vec::with_capacity(NOUN_TAGS.len() * NOUN_TAGS.len());
    for &head in NOUN_TAGS {
        for &modifier in NOUN_TAGS {
            patterns.push([head, DE_TAG, modifier]);
        }
    }
    patterns
}

/// Relaciones de todos los patrones sustantivo–DE–sustantivo en una sola pasada
pub fn noun_de_noun_relations(path: &Path) -> Result<Vec<([&'static str; 3], BigramTable)>> {
    let mut results: Vec<([&'static str; 3], BigramTable)> = noun_de_noun_patterns()
        .into_iter()
        .map(|p| (p, BigramTable::new()))
        .collect();

    let reader = files::open_reader(path)?;
    for_each_tagged_line(reader, path, |tokens| {
        for (pattern, table) in results.iter_mut() {
            relations_in_sentence(tokens, pattern, table);
        }
    })?;
    Ok(results)
}
