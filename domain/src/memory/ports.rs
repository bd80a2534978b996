//! Collaborator contracts consumed by the memory store.

use super::entities::MemoryItem;
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a [`Summarizer`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SummarizeError(pub String);

/// Compacts a sequence of contents into one content.
///
/// The store never calls this with an empty slice.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, contents: &[String]) -> Result<String, SummarizeError>;
}

/// Orders recall candidates by relevance to a query.
///
/// Implementations must be restartable: the same query over the same
/// candidates yields the same order. Candidates may be dropped as irrelevant.
pub trait RecallRanker: Send + Sync {
    fn rank(&self, query: &str, candidates: Vec<MemoryItem>) -> Vec<MemoryItem>;
}
