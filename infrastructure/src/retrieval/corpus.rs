//! Offline retrieval over a local JSON corpus.
//!
//! The corpus file is a JSON array of records:
//!
//! ```json
//! [
//!   { "title": "Market", "content": "Humanoid robot market reached 38B", "url": "https://..." }
//! ]
//! ```
//!
//! A record matches a query when it shares at least one term with it. Records
//! are ranked by the number of distinct query terms they contain; ties keep
//! corpus order, so the same query always returns the same records.

use async_trait::async_trait;
use research_application::{RetrievalError, RetrievalProvider};
use research_domain::RetrievalRecord;
use research_domain::core::text::terms;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a corpus file.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse corpus {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

struct IndexedRecord {
    record: RetrievalRecord,
    terms: HashSet<String>,
}

/// Term-matching retrieval over an in-memory record list.
pub struct CorpusRetrieval {
    records: Vec<IndexedRecord>,
    max_results: usize,
}

impl CorpusRetrieval {
    pub fn new(records: Vec<RetrievalRecord>, max_results: usize) -> Self {
        let records = records
            .into_iter()
            .map(|record| {
                let terms = terms(&format!("{} {}", record.title, record.content))
                    .into_iter()
                    .collect();
                IndexedRecord { record, terms }
            })
            .collect();
        Self {
            records,
            max_results,
        }
    }

    /// Load records from a JSON file.
    pub fn from_path(path: &Path, max_results: usize) -> Result<Self, CorpusError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<RetrievalRecord> =
            serde_json::from_str(&raw).map_err(|source| CorpusError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Loaded {} corpus records from {}", records.len(), path.display());
        Ok(Self::new(records, max_results))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(&self, query: &str) -> Vec<RetrievalRecord> {
        let query_terms: HashSet<String> = terms(query).into_iter().collect();
        if query_terms.is_empty() {
            return Vec::new();
        }
        let mut scored: Vec<(usize, usize)> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, indexed)| {
                let hits = query_terms.intersection(&indexed.terms).count();
                (hits > 0).then_some((hits, index))
            })
            .collect();
        // stable: equal hit counts keep corpus order
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(self.max_results)
            .map(|(_, index)| self.records[index].record.clone())
            .collect()
    }
}

#[async_trait]
impl RetrievalProvider for CorpusRetrieval {
    fn name(&self) -> &str {
        "corpus"
    }

    async fn search(&self, query: &str) -> Result<Vec<RetrievalRecord>, RetrievalError> {
        if self.records.is_empty() {
            return Err(RetrievalError::Unavailable("corpus is empty".to_string()));
        }
        let results = self.matches(query);
        debug!("Corpus query '{}' matched {} records", query, results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn corpus() -> CorpusRetrieval {
        CorpusRetrieval::new(
            vec![
                RetrievalRecord::new("Market", "Humanoid robot market size reached 38B", "u1"),
                RetrievalRecord::new("Suppliers", "Actuator supply chain risks", "u2"),
                RetrievalRecord::new("Robot market", "Robot market growth by region", "u3"),
            ],
            2,
        )
    }

    #[tokio::test]
    async fn test_search_ranks_by_matching_terms() {
        let results = corpus().search("robot market").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "u1");
        assert_eq!(results[1].url, "u3");
    }

    #[tokio::test]
    async fn test_search_without_match_is_empty() {
        let results = corpus().search("semiconductor").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_repeatable() {
        let corpus = corpus();
        let first = corpus.search("supply chain risks").await.unwrap();
        let second = corpus.search("supply chain risks").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].title, "Suppliers");
    }

    #[tokio::test]
    async fn test_empty_corpus_is_unavailable() {
        let corpus = CorpusRetrieval::new(vec![], 5);
        assert!(matches!(
            corpus.search("anything").await,
            Err(RetrievalError::Unavailable(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(
            &path,
            r#"[{"title": "A", "content": "alpha beta"}, {"content": "gamma"}]"#,
        )
        .unwrap();
        let corpus = CorpusRetrieval::from_path(&path, 5).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_from_path_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            CorpusRetrieval::from_path(&path, 5),
            Err(CorpusError::Parse { .. })
        ));
    }
}
