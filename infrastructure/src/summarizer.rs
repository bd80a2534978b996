//! Extractive summarization for memory compression.
//!
//! Keeps the first unique sentences across all contents, in order. No text
//! is generated, so summaries only ever contain retrieved wording.

use async_trait::async_trait;
use research_domain::{SummarizeError, Summarizer};
use std::collections::HashSet;

const DEFAULT_MAX_SENTENCES: usize = 6;

/// [`Summarizer`] that selects sentences instead of writing them.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    max_sentences: usize,
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SENTENCES)
    }
}

impl ExtractiveSummarizer {
    pub fn new(max_sentences: usize) -> Self {
        Self {
            max_sentences: max_sentences.max(1),
        }
    }

    fn sentences(text: &str) -> impl Iterator<Item = &str> {
        text.split_inclusive(['.', '!', '?', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, contents: &[String]) -> Result<String, SummarizeError> {
        let mut seen = HashSet::new();
        let selected: Vec<&str> = contents
            .iter()
            .flat_map(|c| Self::sentences(c))
            .filter(|s| seen.insert(s.to_lowercase()))
            .take(self.max_sentences)
            .collect();
        if selected.is_empty() {
            return Err(SummarizeError("nothing to summarize".to_string()));
        }
        Ok(selected.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_summarize_dedupes_sentences() {
        let summarizer = ExtractiveSummarizer::new(5);
        let summary = summarizer
            .summarize(&[
                "Market reached 38B. Growth is strong.".to_string(),
                "market reached 38B. Supply is tight!".to_string(),
            ])
            .await
            .unwrap();
        assert_eq!(summary, "Market reached 38B. Growth is strong. Supply is tight!");
    }

    #[tokio::test]
    async fn test_summarize_is_bounded() {
        let summarizer = ExtractiveSummarizer::new(2);
        let summary = summarizer
            .summarize(&["One. Two. Three.".to_string()])
            .await
            .unwrap();
        assert_eq!(summary, "One. Two.");
    }

    #[tokio::test]
    async fn test_summarize_blank_contents_fails() {
        let summarizer = ExtractiveSummarizer::default();
        assert!(summarizer.summarize(&["   ".to_string()]).await.is_err());
    }
}
