//! Claves de n-gramas y su codificación textual
//!
//! - Unigrama: la palabra tal cual, escapando `\`, tabulador y saltos de línea.
//! - Bigrama y trigrama: un array JSON de cadenas (`["el","perro"]`).
//!
//! Ambas codificaciones son reversibles para cualquier cadena.

use std::hash::Hash;

pub type Unigram = String;
pub type Bigram = [String; 2];
pub type Trigram = [String; 3];

/// Comodín de las consultas; nunca lo produce la extracción
pub const WILDCARD: &str = "*";

/// Clave de una tabla de frecuencias
pub trait NgramKey: Clone + Eq + Hash + Ord + Send + Sync {
    /// Número de elementos de la clave
    const ORDER: usize;

    /// Extensión de los archivos de tabla de este orden
    const EXTENSION: &'static str;

    fn encode(&self) -> String;

    fn decode(text: &str) -> Result<Self, String>;
}

impl NgramKey for Unigram {
    const ORDER: usize = 1;
    const EXTENSION: &'static str = "unigrams";

    fn encode(&self) -> String {
        let mut out = String::with_capacity(self.len());
        for ch in self.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\t' => out.push_str("\\t"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                _ => out.push(ch),
            }
        }
        out
    }

    fn decode(text: &str) -> Result<Self, String> {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('t') => out.push('\t'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some(other) => return Err(format!("escape desconocido '\\{}'", other)),
                None => return Err("escape incompleto al final".to_string()),
            }
        }
        Ok(out)
    }
}

macro_rules! json_array_key {
    ($order:literal, $extension:literal) => {
        impl NgramKey for [String; $order] {
            const ORDER: usize = $order;
            const EXTENSION: &'static str = $extension;

            fn encode(&self) -> String {
                // Serializar un array de cadenas no puede fallar
                serde_json::to_string(self).unwrap_or_default()
            }

            fn decode(text: &str) -> Result<Self, String> {
                serde_json::from_str(text)
                    .map_err(|e| format!("clave de {} elementos inválida: {}", $order, e))
            }
        }
    };
}

json_array_key!(2, "bigrams");
json_array_key!(3, "tritags");

/// Construye un bigrama a partir de dos cadenas
pub fn bigram(first: &str, second: &str) -> Bigram {
    [first.to_string(), second.to_string()]
}

/// Construye un trigrama a partir de tres cadenas
pub fn trigram(first: &str, second: &str, third: &str) -> Trigram {
    [first.to_string(), second.to_string(), third.to_string()]
}
