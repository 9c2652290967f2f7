//! Extractores de n-gramas
//!
//! Unigramas y bigramas salen de texto plano; trigramas de etiquetas salen
//! de un corpus ya etiquetado. Ningún n-grama cruza el final de línea.

use std::io::BufRead;
use std::path::Path;

use super::key::{Bigram, NgramKey, Trigram, Unigram};
use super::table::FrequencyTable;
use super::tagged::parse_tagged_line;
use crate::error::Result;
use crate::files;
use crate::text;

/// Algoritmo de extracción línea a línea
pub trait Extractor: Sync {
    type Key: NgramKey;

    /// Cuenta los n-gramas de una línea sobre la tabla
    fn extract_line(&self, line_num: usize, line: &str, table: &mut FrequencyTable<Self::Key>);

    /// Extrae de una secuencia de líneas en memoria
    fn extract_lines<I, S>(&self, lines: I) -> FrequencyTable<Self::Key>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = FrequencyTable::new();
        for (idx, line) in lines.into_iter().enumerate() {
            self.extract_line(idx + 1, line.as_ref(), &mut table);
        }
        table
    }

    /// Extrae de un lector; un fallo de E/S aborta la lectura
    fn extract_reader<R: BufRead>(&self, reader: R, path: &Path) -> Result<FrequencyTable<Self::Key>> {
        let mut table = FrequencyTable::new();
        files::for_each_line(reader, path, |line_num, line| {
            self.extract_line(line_num, line, &mut table)
        })?;
        Ok(table)
    }

    /// Extrae de un archivo
    fn extract_file(&self, path: &Path) -> Result<FrequencyTable<Self::Key>> {
        let reader = files::open_reader(path)?;
        self.extract_reader(reader, path)
    }
}

/// Palabras normalizadas de texto plano
#[derive(Debug, Clone, Copy, Default)]
pub struct UnigramExtractor;

impl Extractor for UnigramExtractor {
    type Key = Unigram;

    fn extract_line(&self, _line_num: usize, line: &str, table: &mut FrequencyTable<Unigram>) {
        table.extend(text::words(line));
    }
}

/// Pares de palabras adyacentes dentro de una oración
#[derive(Debug, Clone, Copy, Default)]
pub struct BigramExtractor;

impl Extractor for BigramExtractor {
    type Key = Bigram;

    fn extract_line(&self, _line_num: usize, line: &str, table: &mut FrequencyTable<Bigram>) {
        for sentence in text::sentences(line) {
            for pair in sentence.windows(2) {
                table.add([pair[0].clone(), pair[1].clone()]);
            }
        }
    }
}

/// Ternas de etiquetas consecutivas de un corpus etiquetado
#[derive(Debug, Clone, Copy, Default)]
pub struct TrigramExtractor;

impl Extractor for TrigramExtractor {
    type Key = Trigram;

    fn extract_line(&self, line_num: usize, line: &str, table: &mut FrequencyTable<Trigram>) {
        let tokens = match parse_tagged_line(line_num, line) {
            Ok(tokens) => tokens,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };
        for window in tokens.windows(3) {
            table.add([
                window[0].tag.to_string(),
                window[1].tag.to_string(),
                window[2].tag.to_string(),
            ]);
        }
    }
}
