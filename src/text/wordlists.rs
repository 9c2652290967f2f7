//! Listas fijas de palabras funcionales y signos de puntuación
//!
//! El orden de `stopwords` es significativo: define las componentes del
//! vector de coocurrencia.

use std::collections::HashSet;

pub const PREPOSITIONS: &[&str] = &[
    "a", "á", "ante", "bajo", "cabe", "con", "contra", "de", "desde", "durante", "en", "entre",
    "hacia", "hasta", "mediante", "para", "por", "según", "sin", "so", "sobre", "tras", "versus",
    "vía",
];

pub const PRONOUNS: &[&str] = &[
    "yo", "tú", "él", "ella", "nosotros", "vosotros", "ellos", "me", "te", "se", "nos", "os", "le",
    "les",
];

pub const DETERMINERS: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "unos", "unas", "este", "esta", "estos", "estas", "ese",
    "esa", "esos", "esas", "aquel", "aquella", "aquellos", "aquellas", "mi", "mis", "tu", "tus",
    "su", "sus", "nuestro", "nuestra", "nuestros", "nuestras", "vuestro", "vuestra", "vuestros",
    "vuestras",
];

pub const CONJUNCTIONS: &[&str] = &[
    "y", "e", "ni", "o", "u", "pero", "mas", "sino", "aunque", "porque", "pues", "que",
];

pub const CONTRACTIONS: &[&str] = &["al", "del"];

/// Signos que el preprocesado separa como tokens y que se etiquetan a sí mismos
pub const PUNCTUATION: &[&str] = &[":", ";", ".", ",", "!", "?", "¡", "¿"];

/// Listas de palabras construidas una sola vez y compartidas por referencia
#[derive(Debug, Clone)]
pub struct WordLists {
    stopwords: Vec<String>,
    stopword_set: HashSet<String>,
    punctuation: HashSet<String>,
}

impl WordLists {
    pub fn spanish() -> Self {
        let stopwords: Vec<String> = PREPOSITIONS
            .iter()
            .chain(PRONOUNS)
            .chain(DETERMINERS)
            .chain(CONJUNCTIONS)
            .chain(CONTRACTIONS)
            .map(|w| w.to_string())
            .collect();
        let stopword_set = stopwords.iter().cloned().collect();
        let punctuation = PUNCTUATION.iter().map(|p| p.to_string()).collect();

        Self {
            stopwords,
            stopword_set,
            punctuation,
        }
    }

    /// Vocabulario ordenado de palabras funcionales
    pub fn stopwords(&self) -> &[String] {
        &self.stopwords
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopword_set.contains(word)
    }

    pub fn is_punctuation(&self, token: &str) -> bool {
        self.punctuation.contains(token)
    }
}

impl Default for WordLists {
    fn default() -> Self {
        Self::spanish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopword_order() {
        let lists = WordLists::spanish();
        let words = lists.stopwords();
        assert_eq!(words[0], "a");
        assert_eq!(words[PREPOSITIONS.len()], "yo");
        assert_eq!(words.last().map(String::as_str), Some("del"));
        assert_eq!(
            words.len(),
            PREPOSITIONS.len()
                + PRONOUNS.len()
                + DETERMINERS.len()
                + CONJUNCTIONS.len()
                + CONTRACTIONS.len()
        );
    }

    #[test]
    fn test_lookups() {
        let lists = WordLists::spanish();
        assert!(lists.is_stopword("según"));
        assert!(lists.is_stopword("del"));
        assert!(!lists.is_stopword("perro"));
        assert!(lists.is_punctuation("¿"));
        assert!(!lists.is_punctuation("-"));
    }
}
