//! Consultas por patrón sobre trigramas de etiquetas
//!
//! Cada posición del patrón es una etiqueta literal o el comodín `*`.

use std::fmt;

use crate::dictionary::UNKNOWN_TAG;
use crate::ngram::{Trigram, TrigramTable, WILDCARD};

/// Posición de un patrón
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSlot {
    Tag(String),
    Any,
}

impl TagSlot {
    pub fn parse(s: &str) -> Self {
        if s == WILDCARD {
            TagSlot::Any
        } else {
            TagSlot::Tag(s.to_string())
        }
    }

    pub fn matches(&self, tag: &str) -> bool {
        match self {
            TagSlot::Any => true,
            TagSlot::Tag(expected) => expected == tag,
        }
    }
}

impl fmt::Display for TagSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagSlot::Any => f.write_str(WILDCARD),
            TagSlot::Tag(tag) => f.write_str(tag),
        }
    }
}

/// Patrón de tres posiciones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrigramPattern {
    slots: [TagSlot; 3],
}

impl TrigramPattern {
    pub fn new(first: &str, second: &str, third: &str) -> Self {
        Self {
            slots: [
                TagSlot::parse(first),
                TagSlot::parse(second),
                TagSlot::parse(third),
            ],
        }
    }

    pub fn from_slots(slots: [TagSlot; 3]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[TagSlot; 3] {
        &self.slots
    }

    pub fn matches(&self, trigram: &Trigram) -> bool {
        self.slots
            .iter()
            .zip(trigram.iter())
            .all(|(slot, tag)| slot.matches(tag))
    }

    /// ¿Sin comodines?
    pub fn is_literal(&self) -> bool {
        self.slots.iter().all(|s| matches!(s, TagSlot::Tag(_)))
    }
}

impl fmt::Display for TrigramPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.slots[0], self.slots[1], self.slots[2])
    }
}

/// Trigramas que encajan en el patrón con conteo >= umbral
///
/// Con `skip_unknown` se descartan los trigramas que contienen `UNK`.
/// El resultado sigue el orden canónico de la tabla. Un patrón sin
/// comodines se resuelve con una sola búsqueda.
pub fn query_tag_trigrams<'t>(
    table: &'t TrigramTable,
    pattern: &TrigramPattern,
    threshold: u64,
    skip_unknown: bool,
) -> Vec<(&'t Trigram, u64)> {
    let accept = |&(trigram, count): &(&Trigram, u64)| {
        count >= threshold && (!skip_unknown || !trigram.iter().any(|t| t == UNKNOWN_TAG))
    };

    if pattern.is_literal() {
        let key: Trigram = pattern.slots().clone().map(|slot| slot.to_string());
        return table.entry(&key).into_iter().filter(accept).collect();
    }

    let mut hits: Vec<(&Trigram, u64)> = table
        .iter()
        .filter(|&(trigram, _)| pattern.matches(trigram))
        .filter(accept)
        .collect();
    hits.sort_by(|a, b| a.0.cmp(b.0));
    hits
}

/// Contexto `(a, *, c)` que rodea a una etiqueta objetivo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetContext {
    /// Marco con el centro libre
    pub frame: TrigramPattern,
    /// Conteo del trigrama candidato `(a, objetivo, c)`
    pub count: u64,
    /// Trigramas que llenan el marco
    pub fillers: Vec<(Trigram, u64)>,
}

/// Busca contextos estrechos de una etiqueta
///
/// 1. Candidatos `(*, objetivo, *)` con conteo >= `candidate_threshold`, sin `UNK`.
/// 2. Para cada candidato `(a, objetivo, c)`, rellenos `(a, *, c)` con
///    conteo >= `filler_threshold` (se admite `UNK`).
/// 3. Se informa el contexto solo si hay menos de `max_fillers` rellenos.
pub fn query_target_trigrams(
    table: &TrigramTable,
    target: &str,
    candidate_threshold: u64,
    filler_threshold: u64,
    max_fillers: usize,
) -> Vec<TargetContext> {
    let candidates = query_tag_trigrams(
        table,
        &TrigramPattern::new(WILDCARD, target, WILDCARD),
        candidate_threshold,
        true,
    );

    let mut contexts = Vec::new();
    for (candidate, count) in candidates {
        let frame = TrigramPattern::from_slots([
            TagSlot::Tag(candidate[0].clone()),
            TagSlot::Any,
            TagSlot::Tag(candidate[2].clone()),
        ]);
        let fillers: Vec<(Trigram, u64)> = query_tag_trigrams(table, &frame, filler_threshold, false)
            .into_iter()
            .map(|(t, c)| (t.clone(), c))
            .collect();

        if fillers.len() < max_fillers {
            contexts.push(TargetContext {
                frame,
                count,
                fillers,
            });
        }
    }
    contexts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::{trigram, FrequencyTable};

    fn table() -> TrigramTable {
        let mut table = FrequencyTable::new();
        table.add_count(trigram("EL", "NMS", "DE"), 5);
        table.add_count(trigram("EL", "UNK", "DE"), 3);
        table.add_count(trigram("LA", "NFS", "DE"), 4);
        table.add_count(trigram("LA", "NFS", "."), 1);
        table.add_count(trigram("DE", "EL", "NMS"), 2);
        table
    }

    #[test]
    fn test_all_wildcards_returns_everything() {
        let table = table();
        let result = query_tag_trigrams(&table, &TrigramPattern::new("*", "*", "*"), 0, false);
        assert_eq!(result.len(), table.len());
        for (key, count) in result {
            assert_eq!(table.count(key), count);
        }
    }

    #[test]
    fn test_literal_pattern_at_most_one() {
        let table = table();
        let pattern = TrigramPattern::new("EL", "NMS", "DE");
        assert!(pattern.is_literal());
        let result = query_tag_trigrams(&table, &pattern, 0, false);
        assert_eq!(result, vec![(&trigram("EL", "NMS", "DE"), 5)]);

        let missing = TrigramPattern::new("EL", "NFS", "DE");
        assert!(query_tag_trigrams(&table, &missing, 0, false).is_empty());
    }

    #[test]
    fn test_literal_pattern_honours_threshold_and_unknown() {
        let table = table();
        let pattern = TrigramPattern::new("EL", "NMS", "DE");
        assert!(query_tag_trigrams(&table, &pattern, 6, false).is_empty());

        let unknown = TrigramPattern::new("EL", "UNK", "DE");
        assert_eq!(query_tag_trigrams(&table, &unknown, 3, false).len(), 1);
        assert!(query_tag_trigrams(&table, &unknown, 0, true).is_empty());
    }

    #[test]
    fn test_threshold_inclusive() {
        let table = table();
        let pattern = TrigramPattern::new("*", "*", "DE");
        assert_eq!(query_tag_trigrams(&table, &pattern, 4, false).len(), 2);
        assert_eq!(query_tag_trigrams(&table, &pattern, 5, false).len(), 1);
        assert!(query_tag_trigrams(&table, &pattern, 6, false).is_empty());
    }

    #[test]
    fn test_skip_unknown() {
        let table = table();
        let pattern = TrigramPattern::new("EL", "*", "DE");
        assert_eq!(query_tag_trigrams(&table, &pattern, 0, false).len(), 2);
        let known = query_tag_trigrams(&table, &pattern, 0, true);
        assert_eq!(known, vec![(&trigram("EL", "NMS", "DE"), 5)]);
    }

    #[test]
    fn test_results_sorted() {
        let table = table();
        let result = query_tag_trigrams(&table, &TrigramPattern::new("*", "*", "*"), 0, false);
        let keys: Vec<&Trigram> = result.iter().map(|(k, _)| *k).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_display() {
        assert_eq!(TrigramPattern::new("NMS", "*", "NFS").to_string(), "(NMS, *, NFS)");
    }

    #[test]
    fn test_target_contexts() {
        let table = table();
        // Candidatos de NFS: (LA, NFS, DE)=4 y (LA, NFS, .)=1
        let contexts = query_target_trigrams(&table, "NFS", 1, 0, 2);
        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[0].frame, TrigramPattern::new("LA", "*", "."));
        assert_eq!(contexts[0].count, 1);
        assert_eq!(contexts[1].frame, TrigramPattern::new("LA", "*", "DE"));
        assert_eq!(contexts[1].fillers, vec![(trigram("LA", "NFS", "DE"), 4)]);

        // (EL, *, DE) tiene dos rellenos: NMS y UNK
        let contexts = query_target_trigrams(&table, "NMS", 0, 0, 2);
        assert!(contexts.iter().all(|c| c.frame != TrigramPattern::new("EL", "*", "DE")));
        let contexts = query_target_trigrams(&table, "NMS", 0, 0, 3);
        let frame = contexts
            .iter()
            .find(|c| c.frame == TrigramPattern::new("EL", "*", "DE"))
            .unwrap();
        assert_eq!(frame.fillers.len(), 2);
    }
}
