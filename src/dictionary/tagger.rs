//! Etiquetador por consulta de diccionario
//!
//! Precedencia de etiquetas:
//! 1. signo de puntuación → el propio signo
//! 2. palabra funcional → la palabra en mayúsculas
//! 3. palabra del diccionario de referencia → su categoría
//! 4. resto → `UNK`

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::Path;

use super::loader::TagDictionary;
use crate::error::{NgramError, Result};
use crate::files;
use crate::text::WordLists;

/// Etiqueta de las palabras desconocidas
pub const UNKNOWN_TAG: &str = "UNK";

pub struct Tagger<'a> {
    word_lists: &'a WordLists,
    categories: HashMap<String, String>,
}

impl<'a> Tagger<'a> {
    pub fn new(word_lists: &'a WordLists, dictionary: &TagDictionary) -> Self {
        Self {
            word_lists,
            categories: dictionary.word_categories(),
        }
    }

    /// Etiqueta de una palabra
    pub fn tag(&self, word: &str) -> String {
        if self.word_lists.is_punctuation(word) {
            word.to_string()
        } else if self.word_lists.is_stopword(word) {
            word.to_uppercase()
        } else if let Some(category) = self.categories.get(word) {
            category.clone()
        } else {
            UNKNOWN_TAG.to_string()
        }
    }

    /// Etiqueta una línea ya preprocesada: `palabra/ETIQUETA` separados por espacios
    pub fn tag_line(&self, line: &str) -> String {
        line.split_whitespace()
            .map(|word| format!("{}/{}", word, self.tag(word)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Etiqueta un lector completo línea a línea
    pub fn tag_reader<R: BufRead, W: Write + ?Sized>(
        &self,
        reader: R,
        path: &Path,
        writer: &mut W,
    ) -> Result<usize> {
        let mut lines = 0usize;
        let mut write_error = None;

        files::for_each_line(reader, path, |_, line| {
            if write_error.is_some() {
                return;
            }
            if let Err(e) = writeln!(writer, "{}", self.tag_line(line)) {
                write_error = Some(e);
            } else {
                lines += 1;
            }
        })?;

        match write_error {
            Some(e) => Err(NgramError::file_access(path, e)),
            None => Ok(lines),
        }
    }

    /// Etiqueta un archivo y escribe el resultado de forma atómica
    pub fn tag_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<usize> {
        let input = input.as_ref();
        let output = output.as_ref();
        let reader = files::open_reader(input)?;

        let mut tagged = Vec::new();
        let lines = self.tag_reader(reader, input, &mut tagged)?;
        files::write_atomically(output, |w| w.write_all(&tagged))?;

        log::debug!(
            "{}: {} líneas etiquetadas en {}",
            input.display(),
            lines,
            output.display()
        );
        Ok(lines)
    }
}
