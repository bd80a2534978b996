//! Broad-to-narrow query expansion.
//!
//! A subtask is first searched as written, then at progressively narrower
//! levels. The retrieval loop cycles through the sequence, so later steps
//! keep probing different angles instead of repeating one query.

/// Levels used after the plain query, broadest first.
pub const EXPANSION_LEVELS: &[&str] = &["Industry level", "Company level", "Data level"];

/// The plain query followed by one query per expansion level.
pub fn expand_query(base: &str) -> Vec<String> {
    let base = base.trim();
    std::iter::once(base.to_string())
        .chain(
            EXPANSION_LEVELS
                .iter()
                .map(|level| format!("{}: {}", level, base)),
        )
        .collect()
}

/// Query for the 1-based `step` of a subtask.
pub fn query_for_step(base: &str, step: usize) -> String {
    let queries = expand_query(base);
    let index = step.saturating_sub(1) % queries.len();
    queries[index].clone()
}
