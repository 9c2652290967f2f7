//! Modelos de n-gramas
//!
//! Tablas de frecuencias genéricas sobre la clave y los extractores que
//! las producen.

pub mod extract;
pub mod key;
pub mod table;
pub mod tagged;

pub use extract::{BigramExtractor, Extractor, TrigramExtractor, UnigramExtractor};
pub use key::{bigram, trigram, Bigram, NgramKey, Trigram, Unigram, WILDCARD};
pub use table::FrequencyTable;
pub use tagged::{for_each_tagged_line, parse_tagged_line, TaggedToken};

pub type UnigramTable = FrequencyTable<Unigram>;
pub type BigramTable = FrequencyTable<Bigram>;
pub type TrigramTable = FrequencyTable<Trigram>;
