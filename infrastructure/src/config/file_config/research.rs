//! Research loop configuration from TOML (`[research]` section)

use research_application::ResearchParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Control loop configuration from TOML.
///
/// # Example
///
/// ```toml
/// [research]
/// max_concurrent_subtasks = 4
/// subtask_timeout_secs = 120
/// recall_limit = 8
/// consolidate_memory = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResearchConfig {
    pub max_concurrent_subtasks: usize,
    /// Omit for no per-subtask time limit.
    pub subtask_timeout_secs: Option<u64>,
    pub recall_limit: usize,
    pub consolidate_memory: bool,
}

impl Default for FileResearchConfig {
    fn default() -> Self {
        let params = ResearchParams::default();
        Self {
            max_concurrent_subtasks: params.max_concurrent_subtasks,
            subtask_timeout_secs: params.subtask_timeout.map(|d| d.as_secs()),
            recall_limit: params.recall_limit,
            consolidate_memory: params.consolidate_memory,
        }
    }
}

impl FileResearchConfig {
    /// Convert to application `ResearchParams`.
    ///
    /// Range checks happen in `ResearchConfig::validate`.
    pub fn to_research_params(&self) -> ResearchParams {
        ResearchParams::default()
            .with_max_concurrent_subtasks(self.max_concurrent_subtasks)
            .with_subtask_timeout(self.subtask_timeout_secs.map(Duration::from_secs))
            .with_recall_limit(self.recall_limit)
            .with_consolidate_memory(self.consolidate_memory)
    }
}
