//! Comparación y filtrado de tablas de unigramas

use crate::ngram::{Unigram, UnigramTable};
use crate::text::WordLists;

/// Solapamiento de las frecuencias relativas de dos tablas
///
/// Suma, para cada palabra común, el mínimo de sus frecuencias relativas.
/// Vale 1.0 para distribuciones idénticas y 0.0 si no comparten palabras.
pub fn overlap(first: &UnigramTable, second: &UnigramTable) -> f64 {
    let first_total = first.total();
    let second_total = second.total();
    if first_total == 0 || second_total == 0 {
        return 0.0;
    }

    let mut common: Vec<(&Unigram, u64, u64)> = first
        .iter()
        .filter_map(|(word, count)| match second.count(word) {
            0 => None,
            other => Some((word, count, other)),
        })
        .collect();
    // Orden fijo para que la suma en coma flotante sea reproducible
    common.sort_by(|a, b| a.0.cmp(b.0));

    common
        .into_iter()
        .map(|(_, a, b)| {
            let a = a as f64 / first_total as f64;
            let b = b as f64 / second_total as f64;
            a.min(b)
        })
        .sum()
}

/// Palabras de contenido con `min <= conteo <= max`, en orden canónico
pub fn content_words_in_range<'t>(
    table: &'t UnigramTable,
    min: u64,
    max: u64,
    word_lists: &WordLists,
) -> Vec<(&'t Unigram, u64)> {
    table
        .sorted()
        .into_iter()
        .filter(|&(word, count)| count >= min && count <= max && !word_lists.is_stopword(word))
        .collect()
}
