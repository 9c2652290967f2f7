//! Operaciones sobre archivos y directorios de lote
//!
//! Cada archivo de un lote se procesa de forma independiente y en paralelo.
//! Un archivo que falla se registra y cuenta como resultado vacío; el lote
//! continúa con el resto.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::dictionary::Tagger;
use crate::error::{NgramError, Result};
use crate::files;
use crate::ngram::{Extractor, FrequencyTable, NgramKey};
use crate::text;

/// Extensión de los archivos etiquetados
pub const TAGGED_EXTENSION: &str = "tagged";

/// Resumen de un lote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    fn ok(path: &Path) -> Self {
        Self {
            processed: vec![path.to_path_buf()],
            failed: Vec::new(),
        }
    }

    fn failure(path: &Path, error: &NgramError) -> Self {
        Self {
            processed: Vec::new(),
            failed: vec![(path.to_path_buf(), error.to_string())],
        }
    }

    fn combine(mut self, other: Self) -> Self {
        self.processed.extend(other.processed);
        self.failed.extend(other.failed);
        self
    }

    /// Ordena las rutas para que el informe no dependa del reparto entre hilos
    fn finish(mut self) -> Self {
        self.processed.sort();
        self.failed.sort();
        self
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn log_summary(&self, action: &str) {
        if self.is_clean() {
            log::info!("{}: {} archivos correctos", action, self.processed.len());
            return;
        }
        log::warn!(
            "{}: {} archivos correctos, {} con errores",
            action,
            self.processed.len(),
            self.failed.len()
        );
        for (path, reason) in &self.failed {
            log::error!("  {}: {}", path.display(), reason);
        }
    }
}

/// Fija el número de hilos del lote (por defecto, los de rayon)
pub fn configure_threads(jobs: Option<usize>) -> Result<()> {
    if let Some(jobs) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .map_err(|e| NgramError::Argument(format!("no se pudo fijar --jobs {}: {}", jobs, e)))?;
    }
    Ok(())
}

/// Aplica `op` a cada archivo regular del directorio, en paralelo
pub fn for_each_file<F>(input_dir: &Path, op: F) -> Result<BatchReport>
where
    F: Fn(&Path) -> Result<()> + Sync,
{
    let inputs = files::list_files(input_dir)?;
    let report = inputs
        .par_iter()
        .map(|input| {
            log::info!("Procesando archivo: {}", input.display());
            match op(input.as_path()) {
                Ok(()) => BatchReport::ok(input),
                Err(e) => {
                    log::error!("Error procesando {}: {}", input.display(), e);
                    BatchReport::failure(input, &e)
                }
            }
        })
        .reduce(BatchReport::default, BatchReport::combine);
    Ok(report.finish())
}

/// Preprocesa un archivo de texto para el etiquetador
pub fn preprocess_file(input: &Path, output: &Path) -> Result<usize> {
    let reader = files::open_reader(input)?;
    let mut clean = Vec::new();
    let mut lines = 0usize;
    files::for_each_line(reader, input, |_, line| {
        clean.push(text::preprocess_line(line));
        lines += 1;
    })?;

    files::write_atomically(output, |w| {
        for line in &clean {
            writeln!(w, "{}", line)?;
        }
        Ok(())
    })?;
    Ok(lines)
}

/// Preprocesa un directorio; cada salida conserva el nombre de su entrada
pub fn preprocess_batch(input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
    files::require_dir(input_dir, "entrada")?;
    files::require_dir(output_dir, "salida")?;

    for_each_file(input_dir, |input| {
        let name = input.file_name().unwrap_or_default();
        preprocess_file(input, &output_dir.join(name)).map(|_| ())
    })
}

/// Extrae la tabla de un archivo; si no se puede leer, registra el error y
/// devuelve una tabla vacía junto con el error
pub fn extract_or_empty<E: Extractor>(
    extractor: &E,
    input: &Path,
) -> (FrequencyTable<E::Key>, Option<NgramError>) {
    match extractor.extract_file(input) {
        Ok(table) => (table, None),
        Err(e) => {
            log::error!("Error procesando {}: {}", input.display(), e);
            (FrequencyTable::new(), Some(e))
        }
    }
}

/// Crea la tabla de un archivo y la guarda con el umbral dado
///
/// Una entrada ilegible se registra y produce una tabla vacía; solo un
/// fallo al escribir la salida se devuelve como error.
pub fn create_table<E: Extractor>(
    extractor: &E,
    input: &Path,
    output: &Path,
    threshold: u64,
) -> Result<FrequencyTable<E::Key>> {
    let (table, _) = extract_or_empty(extractor, input);
    table.save(output, threshold)?;
    log::info!("Tabla escrita en {} ({} entradas)", output.display(), table.len());
    Ok(table)
}

/// Crea una tabla por archivo del directorio de entrada
///
/// Un archivo ilegible produce una tabla vacía en la salida y figura como
/// fallido en el informe.
pub fn create_batch<E: Extractor>(
    extractor: &E,
    input_dir: &Path,
    output_dir: &Path,
    threshold: u64,
) -> Result<BatchReport> {
    files::require_dir(input_dir, "entrada")?;
    files::require_dir(output_dir, "salida")?;

    for_each_file(input_dir, |input| {
        let output = files::output_path(input, output_dir, <E::Key as NgramKey>::EXTENSION);
        let (table, error) = extract_or_empty(extractor, input);
        table.save(&output, threshold)?;
        log::info!("Tabla escrita en {}", output.display());
        match error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    })
}

/// Combina todas las tablas de un directorio
///
/// La reducción usa `merge`, asociativa y conmutativa, así que el
/// resultado no depende del orden en que terminan los hilos.
pub fn merge_batch<K: NgramKey>(input_dir: &Path) -> Result<(FrequencyTable<K>, BatchReport)> {
    files::require_dir(input_dir, "entrada")?;
    let inputs = files::list_files(input_dir)?;

    let (table, report) = inputs
        .par_iter()
        .map(|input| {
            log::info!("Combinando tabla: {}", input.display());
            match FrequencyTable::<K>::load(input) {
                Ok(table) => (table, BatchReport::ok(input)),
                Err(e) => {
                    log::error!("Error leyendo tabla {}: {}", input.display(), e);
                    (FrequencyTable::new(), BatchReport::failure(input, &e))
                }
            }
        })
        .reduce(
            || (FrequencyTable::new(), BatchReport::default()),
            |(table_a, report_a), (table_b, report_b)| {
                (table_a.merge(table_b), report_a.combine(report_b))
            },
        );

    Ok((table, report.finish()))
}

/// Combina un directorio de tablas y guarda el agregado filtrado
pub fn merge_batch_to_file<K: NgramKey>(
    input_dir: &Path,
    output: &Path,
    threshold: u64,
) -> Result<BatchReport> {
    let (table, report) = merge_batch::<K>(input_dir)?;
    table.save(output, threshold)?;
    log::info!(
        "Tabla combinada escrita en {} ({} entradas)",
        output.display(),
        table.len()
    );
    Ok(report)
}

/// Etiqueta cada archivo del directorio de entrada
pub fn tag_batch(tagger: &Tagger<'_>, input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
    files::require_dir(input_dir, "entrada")?;
    files::require_dir(output_dir, "salida")?;

    for_each_file(input_dir, |input| {
        let output = files::output_path(input, output_dir, TAGGED_EXTENSION);
        tagger.tag_file(input, &output)?;
        log::info!("Archivo etiquetado escrito en {}", output.display());
        Ok(())
    })
}

/// Concatena archivos etiquetados, cada uno seguido de una línea en blanco
///
/// Cada entrada se lee completa antes de escribirla: un archivo ilegible
/// se registra y se omite sin dejar contenido parcial en la salida.
pub fn concatenate_files<P: AsRef<Path>>(inputs: &[P], output: &Path) -> Result<BatchReport> {
    let mut report = BatchReport::default();
    files::write_atomically(output, |w| {
        for input in inputs {
            let input = input.as_ref();
            match fs::read(input) {
                Ok(content) => {
                    w.write_all(&content)?;
                    writeln!(w)?;
                    report.processed.push(input.to_path_buf());
                }
                Err(e) => {
                    let e = NgramError::file_access(input, e);
                    log::error!("Error procesando {}: {}", input.display(), e);
                    report.failed.push((input.to_path_buf(), e.to_string()));
                }
            }
        }
        Ok(())
    })?;
    Ok(report)
}

/// Concatena todos los archivos etiquetados de un directorio, por nombre
pub fn tag_merge(input_dir: &Path, output: &Path) -> Result<BatchReport> {
    files::require_dir(input_dir, "entrada")?;
    let inputs = files::list_files(input_dir)?;
    let report = concatenate_files(&inputs, output)?;
    log::info!("Archivos etiquetados concatenados en {}", output.display());
    Ok(report)
}
