//! Motor de consultas
//!
//! Consultas con comodines sobre trigramas de etiquetas, extracción de
//! palabras y relaciones desde el corpus etiquetado, vectores de
//! coocurrencia y comparación de tablas de unigramas.

pub mod cooccurrence;
pub mod pattern;
pub mod relations;
pub mod similarity;

pub use cooccurrence::{cooccurrence_vector, raw_cooccurrence};
pub use pattern::{query_tag_trigrams, query_target_trigrams, TagSlot, TargetContext, TrigramPattern};
pub use relations::{
    find_relations_from_pattern, find_relations_in_file, find_words_from_pattern,
    find_words_in_file, noun_de_noun_patterns, noun_de_noun_relations, DE_TAG, NOUN_TAGS,
};
pub use similarity::{content_words_in_range, overlap};
