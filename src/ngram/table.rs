//! Tabla de frecuencias de n-gramas
//!
//! Mapa clave → conteo. Nunca almacena conteos nulos. La serialización es
//! una línea por clave, `<clave codificada>\t<conteo>`, en orden
//! lexicográfico de la clave.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

use super::key::NgramKey;
use crate::error::{NgramError, Result};
use crate::files;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: NgramKey> {
    counts: HashMap<K, u64>,
}

impl<K: NgramKey> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NgramKey> FrequencyTable<K> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Cuenta cada aparición de una secuencia de claves
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut table = Self::new();
        table.extend(keys);
        table
    }

    /// Suma una aparición
    pub fn add(&mut self, key: K) {
        self.add_count(key, 1);
    }

    /// Suma `count` apariciones; un conteo nulo no crea la entrada
    ///
    /// Si la suma desborda, el conteo se satura en `u64::MAX` con un aviso.
    pub fn add_count(&mut self, key: K, count: u64) {
        if count == 0 {
            return;
        }
        match self.counts.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(count);
            }
            Entry::Occupied(mut entry) => {
                let sum = match entry.get().checked_add(count) {
                    Some(sum) => sum,
                    None => {
                        log::warn!("conteo desbordado para {}; se satura", entry.key().encode());
                        u64::MAX
                    }
                };
                entry.insert(sum);
            }
        }
    }

    /// Como `add_count`, pero sin tocar la tabla si la suma desborda
    ///
    /// Devuelve `false` en caso de desbordamiento.
    pub fn try_add_count(&mut self, key: K, count: u64) -> bool {
        if count == 0 {
            return true;
        }
        let current = self.counts.entry(key).or_insert(0);
        match current.checked_add(count) {
            Some(sum) => {
                *current = sum;
                true
            }
            None => false,
        }
    }

    /// Conteo de una clave (0 si no está)
    pub fn count(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Entrada de la tabla con su clave almacenada
    pub fn entry(&self, key: &K) -> Option<(&K, u64)> {
        self.counts.get_key_value(key).map(|(k, &c)| (k, c))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Suma de todos los conteos
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(k, &c)| (k, c))
    }

    /// Entradas en orden canónico (lexicográfico por clave)
    pub fn sorted(&self) -> Vec<(&K, u64)> {
        let mut entries: Vec<(&K, u64)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Combina dos tablas sumando los conteos de cada clave
    ///
    /// Asociativa y conmutativa: el orden de combinación de los fragmentos
    /// de un lote no altera el resultado.
    pub fn merge(mut self, other: Self) -> Self {
        // Iterar siempre sobre la tabla pequeña
        if self.counts.len() < other.counts.len() {
            return other.merge(self);
        }
        self.merge_from(other);
        self
    }

    /// Acumula otra tabla sobre esta
    pub fn merge_from(&mut self, other: Self) {
        for (key, count) in other.counts {
            self.add_count(key, count);
        }
    }

    /// Conserva las claves con conteo >= umbral (umbral 0 = identidad)
    pub fn filter(&self, threshold: u64) -> Self {
        Self {
            counts: self
                .counts
                .iter()
                .filter(|(_, &count)| count >= threshold)
                .map(|(k, &c)| (k.clone(), c))
                .collect(),
        }
    }

    /// Serializa las entradas con conteo >= umbral en orden canónico
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W, threshold: u64) -> io::Result<()> {
        for (key, count) in self.sorted() {
            if count >= threshold {
                writeln!(writer, "{}\t{}", key.encode(), count)?;
            }
        }
        Ok(())
    }

    /// Lee una tabla serializada
    ///
    /// Las líneas mal formadas se omiten con un aviso; las vacías se ignoran.
    /// Las claves repetidas se suman. Solo un fallo de E/S del lector
    /// interrumpe la lectura.
    pub fn read_from<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut table = Self::new();
        let mut skipped = 0usize;

        files::for_each_line(reader, path, |line_num, line| {
            if line.trim().is_empty() {
                return;
            }
            let parsed = Self::parse_line(line_num, line).and_then(|(key, count)| {
                if table.try_add_count(key, count) {
                    Ok(())
                } else {
                    Err(NgramError::parse(line_num, "el conteo acumulado desborda u64"))
                }
            });
            if let Err(e) = parsed {
                skipped += 1;
                log::warn!("{}: {}", path.display(), e);
            }
        })?;

        if skipped > 0 {
            log::warn!(
                "{}: {} líneas omitidas por formato inválido",
                path.display(),
                skipped
            );
        }
        Ok(table)
    }

    /// Interpreta una línea `<clave>\t<conteo>`
    pub fn parse_line(line_num: usize, line: &str) -> Result<(K, u64)> {
        let line = line.trim_end_matches(&['\n', '\r'][..]);
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != 2 {
            return Err(NgramError::parse(
                line_num,
                format!("se esperaban 2 columnas, hay {}", parts.len()),
            ));
        }

        let count: u64 = parts[1]
            .trim()
            .parse()
            .map_err(|_| NgramError::parse(line_num, format!("conteo no numérico '{}'", parts[1])))?;
        let key = K::decode(parts[0]).map_err(|reason| NgramError::parse(line_num, reason))?;

        Ok((key, count))
    }

    /// Escribe la tabla en un archivo de forma atómica
    pub fn save<P: AsRef<Path>>(&self, path: P, threshold: u64) -> Result<()> {
        files::write_atomically(path, |writer| self.write_to(writer, threshold))
    }

    /// Carga una tabla desde un archivo
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = files::open_reader(path)?;
        Self::read_from(reader, path)
    }

    /// Carga una tabla; si el archivo no se puede leer, registra el error y
    /// devuelve una tabla vacía
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            log::error!("Error leyendo tabla {}: {}", path.display(), e);
            Self::new()
        })
    }
}

impl<K: NgramKey> Extend<K> for FrequencyTable<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.add(key);
        }
    }
}

impl<K: NgramKey> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self::from_keys(keys)
    }
}

impl<K: NgramKey> FromIterator<(K, u64)> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(entries: I) -> Self {
        let mut table = Self::new();
        for (key, count) in entries {
            table.add_count(key, count);
        }
        table
    }
}
