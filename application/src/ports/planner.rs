//! Planner port
//!
//! Decomposes a research query into subtasks.

use async_trait::async_trait;
use research_domain::Subtask;
use thiserror::Error;

/// Errors that can occur while planning
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Planning failed: {0}")]
    Failed(String),

    #[error("Query is empty")]
    EmptyQuery,
}

#[async_trait]
pub trait ResearchPlanner: Send + Sync {
    /// Split `query` into subtasks, in the order they should be reported.
    async fn plan(&self, query: &str) -> Result<Vec<Subtask>, PlannerError>;
}
