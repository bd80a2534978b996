//! Retrieval port
//!
//! Defines how the control loop fetches evidence for a query.

use async_trait::async_trait;
use research_domain::RetrievalRecord;
use thiserror::Error;

/// Errors that can occur while retrieving evidence
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetrievalError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Retrieval source unavailable: {0}")]
    Unavailable(String),

    #[error("Timeout")]
    Timeout,
}

/// Source of evidence records (web search, local corpus, ...).
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait RetrievalProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch a finite list of records for `query`.
    ///
    /// An empty list is a valid answer; errors are fatal for the calling task.
    async fn search(&self, query: &str) -> Result<Vec<RetrievalRecord>, RetrievalError>;
}
