//! Acceso a archivos
//!
//! Apertura de lectores, escritura atómica y listado de directorios de lote.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{NgramError, Result};

/// Abre un archivo para lectura por líneas
pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| NgramError::file_access(path, e))?;
    Ok(BufReader::new(file))
}

/// Recorre las líneas de un lector, convirtiendo fallos de E/S en `FileAccess`
///
/// El cierre recibe el número de línea (desde 1) y su contenido.
pub fn for_each_line<R, F>(reader: R, path: &Path, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &str),
{
    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| NgramError::file_access(path, e))?;
        f(idx + 1, &line);
    }
    Ok(())
}

/// Escribe un archivo de forma atómica
///
/// El contenido se vuelca a un temporal en el mismo directorio y se
/// renombra al final, así nunca queda un archivo a medio escribir.
pub fn write_atomically<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let temp_file = NamedTempFile::new_in(parent).map_err(|e| NgramError::file_access(path, e))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        write(&mut writer).map_err(|e| NgramError::file_access(path, e))?;
        writer.flush().map_err(|e| NgramError::file_access(path, e))?;
    }
    temp_file
        .persist(path)
        .map_err(|e| NgramError::file_access(path, e.error))?;
    Ok(())
}

/// Archivos regulares de un directorio, ordenados por nombre
pub fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| NgramError::file_access(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| NgramError::file_access(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Exige que el directorio exista
pub fn require_dir<P: AsRef<Path>>(dir: P, role: &str) -> Result<()> {
    let dir = dir.as_ref();
    if dir.is_dir() {
        Ok(())
    } else {
        Err(NgramError::Argument(format!(
            "el directorio de {} '{}' no existe",
            role,
            dir.display()
        )))
    }
}

/// Ruta de salida: mismo nombre base que la entrada con la extensión cambiada
///
/// `corpus/libro.txt` + `bigrams` → `<salida>/libro.bigrams`
pub fn output_path(input: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}.{}", stem, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_replaces_extension() {
        let out = output_path(Path::new("corpus/libro.txt"), Path::new("salida"), "bigrams");
        assert_eq!(out, PathBuf::from("salida/libro.bigrams"));

        let out = output_path(Path::new("corpus/sin_extension"), Path::new("salida"), "tagged");
        assert_eq!(out, PathBuf::from("salida/sin_extension.tagged"));

        let out = output_path(Path::new("a.b.txt"), Path::new("s"), "tritags");
        assert_eq!(out, PathBuf::from("s/a.b.tritags"));
    }

    #[test]
    fn test_write_atomically_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("b.txt");
        write_atomically(&target, |w| writeln!(w, "hola")).unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "hola\n");
        let files = list_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a.txt"), target]);
    }

    #[test]
    fn test_open_missing_file() {
        let err = open_reader("no/existe/nunca.txt").unwrap_err();
        assert!(matches!(err, NgramError::FileAccess { .. }));
    }

    #[test]
    fn test_require_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(require_dir(dir.path(), "entrada").is_ok());
        let err = require_dir(dir.path().join("nada"), "entrada").unwrap_err();
        assert!(err.is_fatal());
    }
}
