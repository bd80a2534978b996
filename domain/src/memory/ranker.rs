//! Term-overlap recall ranking.

use super::entities::MemoryItem;
use super::ports::RecallRanker;
use crate::core::text::terms;
use std::collections::HashSet;

/// Ranks items by the number of distinct query terms they contain.
///
/// Items sharing no term with the query are dropped. Equal scores keep the
/// candidate order (the store passes episodic items before long-term ones,
/// each in insertion order), so the ranking is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalRanker;

impl LexicalRanker {
    fn overlap(query_terms: &HashSet<String>, content: &str) -> usize {
        let content_terms: HashSet<String> = terms(content).into_iter().collect();
        query_terms.intersection(&content_terms).count()
    }
}

impl RecallRanker for LexicalRanker {
    fn rank(&self, query: &str, candidates: Vec<MemoryItem>) -> Vec<MemoryItem> {
        let query_terms: HashSet<String> = terms(query).into_iter().collect();
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, MemoryItem)> = candidates
            .into_iter()
            .map(|item| (Self::overlap(&query_terms, &item.content), item))
            .filter(|(score, _)| *score > 0)
            .collect();

        // sort_by is stable: ties keep candidate order
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, item)| item).collect()
    }
}
