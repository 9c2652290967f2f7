//! Tipos de error
//!
//! Distingue errores de argumentos (fatales), de acceso a archivos
//! (recuperables por archivo) y de formato (recuperables por línea).

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum NgramError {
    /// Argumento ausente o mal formado en la línea de comandos
    #[error("{0}")]
    Argument(String),

    /// Fallo al abrir, leer o escribir un archivo
    #[error("no se pudo acceder a '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Línea mal formada en una tabla serializada o en un corpus etiquetado
    #[error("línea {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl NgramError {
    pub fn file_access<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        NgramError::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        NgramError::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// ¿Debe abortar el proceso? Solo los errores de argumentos lo hacen.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NgramError::Argument(_))
    }
}

pub type Result<T> = std::result::Result<T, NgramError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_argument_errors_are_fatal() {
        assert!(NgramError::Argument("falta <entrada>".to_string()).is_fatal());
        assert!(!NgramError::parse(3, "conteo no numérico").is_fatal());
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no existe");
        assert!(!NgramError::file_access("corpus.txt", io_err).is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = NgramError::parse(7, "faltan columnas");
        assert_eq!(err.to_string(), "línea 7: faltan columnas");

        let io_err = io::Error::new(io::ErrorKind::NotFound, "no existe");
        let err = NgramError::file_access("corpus.txt", io_err);
        assert!(err.to_string().contains("corpus.txt"));
    }
}
