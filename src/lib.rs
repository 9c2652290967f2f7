//! ngramas - Modelos de n-gramas sobre corpus en español
//!
//! Cuenta unigramas, bigramas y trigramas de etiquetas, combina tablas de
//! varios archivos y consulta patrones de etiquetas para descubrir
//! colocaciones y relaciones sintácticas.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod files;
pub mod ngram;
pub mod pipeline;
pub mod query;
pub mod text;

pub use config::Config;
pub use error::{NgramError, Result};
pub use ngram::FrequencyTable;
pub use text::WordLists;
