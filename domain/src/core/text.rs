//! Text helpers: term extraction and safe truncation.
//!
//! Terms are the unit of "coverage" for the stopping policy and of relevance
//! for the lexical recall ranker. Extraction is deliberately simple and
//! deterministic: lowercase, split on anything that is not alphanumeric, drop
//! single-character ASCII fragments and a short list of English stopwords.
//! Non-ASCII runs (e.g. CJK) are kept as whole terms.

use std::collections::HashMap;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "in", "is",
    "it", "its", "of", "on", "or", "that", "the", "this", "to", "was", "were", "with",
];

/// Split `text` into normalized terms, preserving order and repetitions.
pub fn terms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|raw| !raw.is_empty())
        .map(str::to_lowercase)
        .filter(|term| !(term.len() == 1 && term.is_ascii()))
        .filter(|term| !STOPWORDS.contains(&term.as_str()))
        .collect()
}

/// Term frequencies for `text`.
pub fn term_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for term in terms(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Rough token estimate (about four characters per token).
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Truncate to at most `max_chars` characters, appending `…` when cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}…", &s[..end]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_are_lowercased_and_split() {
        assert_eq!(
            terms("Humanoid-Robot market, 2025!"),
            vec!["humanoid", "robot", "market", "2025"]
        );
    }

    #[test]
    fn terms_drop_stopwords_and_single_letters() {
        assert_eq!(terms("the size of a market"), vec!["size", "market"]);
    }

    #[test]
    fn terms_keep_cjk_runs() {
        assert_eq!(terms("市场 规模"), vec!["市场", "规模"]);
    }

    #[test]
    fn term_counts_accumulate_repetitions() {
        let counts = term_counts("robot robot arm");
        assert_eq!(counts["robot"], 2);
        assert_eq!(counts["arm"], 1);
    }

    #[test]
    fn estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
        assert_eq!(estimate_tokens("abcdefghi"), 3);
    }

    #[test]
    fn truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("あのね", 2), "あの…");
        assert_eq!(truncate_chars("hi", 10), "hi");
        assert_eq!(truncate_chars("", 3), "");
    }
}
