//! Normalización de texto
//!
//! Limpieza de líneas del corpus, separación en palabras y segmentación en
//! oraciones. Todo lo que queda fuera del alfabeto español se trata como
//! separador.

/// Signos que el preprocesado conserva como tokens independientes
const KEPT_PUNCTUATION: &[char] = &[':', ';', ',', '.', '¿', '¡', '?', '!'];

/// ¿Pertenece el carácter al alfabeto español (a-z, A-Z, vocales acentuadas, ü, ñ)?
pub fn is_spanish_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü' | 'ñ')
}

/// Sustituye todo carácter fuera del alfabeto por un espacio y colapsa espacios
///
/// Ejemplo: "perro," → "perro", "l'home" → "l home"
pub fn replace_punctuation(word: &str) -> String {
    let replaced: String = word
        .chars()
        .map(|ch| if is_spanish_letter(ch) { ch } else { ' ' })
        .collect();
    collapse_spaces(&replaced)
}

/// Palabras normalizadas de una línea, en minúsculas y en orden
pub fn words(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    for candidate in line.to_lowercase().split_whitespace() {
        let clean = replace_punctuation(candidate);
        result.extend(clean.split(' ').filter(|w| !w.is_empty()).map(String::from));
    }
    result
}

/// Segmenta una línea en oraciones de palabras en minúsculas
///
/// Cualquier carácter que no sea letra ni espacio ASCII cierra la oración
/// en curso, de modo que la puntuación (y también tabuladores o dígitos)
/// separa oraciones. Las oraciones vacías se descartan.
pub fn sentences(line: &str) -> Vec<Vec<String>> {
    let lower = line.to_lowercase();
    let mut result = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut word = String::new();

    for ch in lower.chars() {
        if is_spanish_letter(ch) {
            word.push(ch);
            continue;
        }
        if !word.is_empty() {
            current.push(std::mem::take(&mut word));
        }
        if ch != ' ' && !current.is_empty() {
            result.push(std::mem::take(&mut current));
        }
    }

    if !word.is_empty() {
        current.push(word);
    }
    if !current.is_empty() {
        result.push(current);
    }

    result
}

/// Limpia una línea de corpus para el etiquetador
///
/// Pasa a minúsculas, elimina todo salvo letras y `: ; , . ¿ ¡ ? !`, separa
/// esos signos con espacios y colapsa espacios. Aplicarla dos veces no
/// cambia el resultado.
pub fn preprocess_line(line: &str) -> String {
    let mut spaced = String::with_capacity(line.len() + 8);

    for ch in line.to_lowercase().chars() {
        if is_spanish_letter(ch) {
            spaced.push(ch);
        } else if KEPT_PUNCTUATION.contains(&ch) {
            spaced.push(' ');
            spaced.push(ch);
            spaced.push(' ');
        } else {
            spaced.push(' ');
        }
    }

    collapse_spaces(&spaced)
}

fn collapse_spaces(text: &str) -> String {
    text.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
