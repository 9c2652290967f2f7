//! Texto
//!
//! Normalización del corpus y listas fijas de palabras del español.

pub mod normalizer;
pub mod wordlists;

pub use normalizer::{is_spanish_letter, preprocess_line, replace_punctuation, sentences, words};
pub use wordlists::WordLists;
