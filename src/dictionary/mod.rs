//! Módulo de diccionario
//!
//! Diccionario de etiquetas de referencia y etiquetador por consulta.

pub mod loader;
pub mod tagger;

pub use loader::TagDictionary;
pub use tagger::{Tagger, UNKNOWN_TAG};
