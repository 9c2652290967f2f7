//! Cargador del diccionario de etiquetas de referencia

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::error::Result;
use crate::files;

/// Palabras agrupadas por categoría, en el orden de lectura
#[derive(Debug, Clone, Default)]
pub struct TagDictionary {
    categories: Vec<(String, Vec<String>)>,
}

impl TagDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carga un diccionario desde un archivo
    ///
    /// Formato esperado:
    /// ```text
    /// #NMS
    /// perro
    /// reino
    /// #NFS
    /// casa
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = files::open_reader(path)?;
        Self::load_from_reader(reader, path)
    }

    pub fn load_from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut dictionary = Self::new();
        let mut current: Option<usize> = None;
        let mut orphans = 0usize;

        files::for_each_line(reader, path, |_, line| {
            let line = line.trim();

            if let Some(header) = line.strip_prefix('#') {
                current = Some(dictionary.category_index(header.trim()));
                return;
            }

            // Ignorar líneas vacías
            if line.is_empty() {
                return;
            }

            match current {
                Some(idx) => dictionary.categories[idx].1.push(line.to_string()),
                None => orphans += 1,
            }
        })?;

        if orphans > 0 {
            log::warn!(
                "{}: {} palabras sin categoría descartadas",
                path.display(),
                orphans
            );
        }
        if dictionary.is_empty() {
            log::warn!("{}: diccionario sin categorías; todo será UNK", path.display());
        } else {
            log::debug!("{}: {} categorías cargadas", path.display(), dictionary.len());
        }
        Ok(dictionary)
    }

    /// Índice de la categoría, creándola si no existe
    fn category_index(&mut self, name: &str) -> usize {
        if let Some(idx) = self.categories.iter().position(|(c, _)| c == name) {
            return idx;
        }
        self.categories.push((name.to_string(), Vec::new()));
        self.categories.len() - 1
    }

    /// Añade una palabra a una categoría
    pub fn insert(&mut self, category: &str, word: &str) {
        let idx = self.category_index(category);
        self.categories[idx].1.push(word.to_string());
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(c, words)| (c.as_str(), words.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Invierte el diccionario a palabra → categoría
    ///
    /// Si una palabra figura en varias categorías gana la última leída.
    pub fn word_categories(&self) -> HashMap<String, String> {
        let mut result = HashMap::new();
        for (category, words) in &self.categories {
            for word in words {
                result.insert(word.clone(), category.clone());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> TagDictionary {
        TagDictionary::load_from_reader(text.as_bytes(), Path::new("memoria")).unwrap()
    }

    #[test]
    fn test_groups_by_header() {
        let dict = load("#NMS\nperro\nreino\n# NFS \ncasa\n\n");
        let cats: Vec<(&str, &[String])> = dict.categories().collect();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].0, "NMS");
        assert_eq!(cats[0].1, ["perro".to_string(), "reino".to_string()]);
        assert_eq!(cats[1].0, "NFS");
        assert_eq!(cats[1].1, ["casa".to_string()]);
    }

    #[test]
    fn test_words_before_header_discarded() {
        let dict = load("suelta\n#NMS\nperro\n");
        let map = dict.word_categories();
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key("suelta"));
    }

    #[test]
    fn test_repeated_header_continues_category() {
        let dict = load("#NMS\nperro\n#NFS\ncasa\n#NMS\nreino\n");
        assert_eq!(dict.len(), 2);
        let map = dict.word_categories();
        assert_eq!(map.get("reino").map(String::as_str), Some("NMS"));
    }

    #[test]
    fn test_only_orphans_is_empty() {
        let dict = load("suelta\n\notra\n");
        assert!(dict.is_empty());
        assert_eq!(dict.len(), 0);
    }

    #[test]
    fn test_last_category_wins() {
        let dict = load("#NMS\ncapital\n#NFS\ncapital\n");
        let map = dict.word_categories();
        assert_eq!(map.get("capital").map(String::as_str), Some("NFS"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("etiquetas.txt");
        std::fs::write(&path, "#VERBO\ncorre\nduerme\n").unwrap();

        let dict = TagDictionary::load_from_file(&path).unwrap();
        assert_eq!(dict.word_categories().len(), 2);
        assert!(TagDictionary::load_from_file(dir.path().join("no.txt")).is_err());
    }
}
