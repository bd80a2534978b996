//! Report writer port
//!
//! Turns recalled memory and arbitrated metrics into a [`FinalReport`].

use async_trait::async_trait;
use research_domain::{ArbitrationResult, FinalReport, MemoryItem, Subtask};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur while writing the report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WriterError {
    #[error("Report generation failed: {0}")]
    Failed(String),
}

/// Material gathered for one subtask.
#[derive(Debug, Clone)]
pub struct SectionMaterial {
    pub subtask: Subtask,
    /// Memory recalled for the subtask, most relevant first.
    pub memories: Vec<MemoryItem>,
}

/// Everything a writer needs to produce the final report.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub query: String,
    pub sections: Vec<SectionMaterial>,
    /// Winning value per metric, keyed by metric name.
    pub arbitrations: BTreeMap<String, ArbitrationResult>,
}

#[async_trait]
pub trait ReportWriter: Send + Sync {
    async fn write(&self, draft: &ReportDraft) -> Result<FinalReport, WriterError>;
}
