//! Lectura de corpus etiquetado
//!
//! Cada línea es una oración de tokens `palabra/ETIQUETA` separados por
//! espacios.

use std::io::BufRead;
use std::path::Path;

use crate::error::{NgramError, Result};
use crate::files;

/// Token etiquetado, prestado de la línea original
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedToken<'a> {
    pub word: &'a str,
    pub tag: &'a str,
}

/// Divide una línea etiquetada en tokens
///
/// La etiqueta es lo que sigue a la última `/` del token. Un token sin `/`
/// invalida la línea entera.
pub fn parse_tagged_line(line_num: usize, line: &str) -> Result<Vec<TaggedToken<'_>>> {
    line.split_whitespace()
        .map(|token| match token.rsplit_once('/') {
            Some((word, tag)) if !tag.is_empty() => Ok(TaggedToken { word, tag }),
            _ => Err(NgramError::parse(
                line_num,
                format!("token sin etiqueta '{}'", token),
            )),
        })
        .collect()
}

/// Recorre las oraciones válidas de un corpus etiquetado
///
/// Las líneas mal formadas se omiten con un aviso.
pub fn for_each_tagged_line<R, F>(reader: R, path: &Path, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&[TaggedToken<'_>]),
{
    files::for_each_line(reader, path, |line_num, line| {
        match parse_tagged_line(line_num, line) {
            Ok(tokens) => f(&tokens),
            Err(e) => log::warn!("{}: {}", path.display(), e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_line() {
        let tokens = parse_tagged_line(1, "el/EL perro/UNK ./.").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], TaggedToken { word: "el", tag: "EL" });
        assert_eq!(tokens[2], TaggedToken { word: ".", tag: "." });
    }

    #[test]
    fn test_parse_tagged_line_slash_in_word() {
        let tokens = parse_tagged_line(1, "km/h/UNK").unwrap();
        assert_eq!(tokens[0].word, "km/h");
        assert_eq!(tokens[0].tag, "UNK");
    }

    #[test]
    fn test_parse_tagged_line_missing_tag() {
        assert!(parse_tagged_line(2, "el/EL perro").is_err());
        assert!(parse_tagged_line(2, "perro/").is_err());
        assert!(parse_tagged_line(2, "").unwrap().is_empty());
    }

    #[test]
    fn test_bad_lines_skipped() {
        let text = "el/EL perro/UNK\nroto\nla/LA casa/NFS\n";
        let mut seen = Vec::new();
        for_each_tagged_line(text.as_bytes(), Path::new("memoria"), |tokens| {
            seen.push(tokens.len());
        })
        .unwrap();
        assert_eq!(seen, vec![2, 2]);
    }
}
