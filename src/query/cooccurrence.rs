//! Vector de coocurrencia con palabras funcionales
//!
//! Para una palabra objetivo, la componente k cuenta el bigrama
//! (vocabulario[k], objetivo). Normalizado por la suma, es la distribución
//! empírica de las palabras funcionales que la preceden.

use crate::ngram::BigramTable;

/// Conteos crudos de los bigramas (vocabulario[k], objetivo)
pub fn raw_cooccurrence(target: &str, vocabulary: &[String], bigrams: &BigramTable) -> Vec<u64> {
    vocabulary
        .iter()
        .map(|word| bigrams.count(&[word.clone(), target.to_string()]))
        .collect()
}

/// Vector normalizado; si todos los conteos son cero se devuelve el vector nulo
pub fn cooccurrence_vector(target: &str, vocabulary: &[String], bigrams: &BigramTable) -> Vec<f64> {
    let raw = raw_cooccurrence(target, vocabulary, bigrams);
    let total: u64 = raw.iter().sum();

    if total == 0 {
        return raw.into_iter().map(|c| c as f64).collect();
    }
    raw.into_iter().map(|c| c as f64 / total as f64).collect()
}
