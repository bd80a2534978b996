//! Accumulated coverage of terms seen by one research task.

use crate::core::text::terms;
use std::collections::HashMap;

/// Which terms a task has already covered, and how often.
///
/// Opaque to callers: the only questions it answers are "how novel is this
/// text" and "remember this text".
#[derive(Debug, Clone, Default)]
pub struct InformationState {
    covered: HashMap<String, usize>,
    observations: usize,
}

impl InformationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of `text`'s term occurrences whose term is not yet covered.
    ///
    /// Returns a value in `[0.0, 1.0]`; `0.0` for text without terms.
    /// For a fixed `text` the value can only shrink as more text is absorbed,
    /// because the covered set never loses terms.
    pub fn novelty(&self, text: &str) -> f64 {
        let occurrences = terms(text);
        if occurrences.is_empty() {
            return 0.0;
        }
        let novel = occurrences
            .iter()
            .filter(|t| !self.covered.contains_key(t.as_str()))
            .count();
        novel as f64 / occurrences.len() as f64
    }

    /// Record every term of `text` as covered.
    pub fn absorb(&mut self, text: &str) {
        for term in terms(text) {
            *self.covered.entry(term).or_insert(0) += 1;
        }
        self.observations += 1;
    }

    /// Number of distinct terms covered so far.
    pub fn distinct_terms(&self) -> usize {
        self.covered.len()
    }

    /// Number of texts absorbed so far.
    pub fn observations(&self) -> usize {
        self.observations
    }
}
