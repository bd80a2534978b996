//! Research parameters: control loop settings.
//!
//! [`ResearchParams`] groups the static parameters that control the
//! research loop in [`RunResearchUseCase`](crate::use_cases::run_research::RunResearchUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Control loop parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchParams {
    /// Maximum number of subtasks researched at the same time.
    pub max_concurrent_subtasks: usize,
    /// Wall-clock budget per subtask; `None` means unbounded.
    pub subtask_timeout: Option<Duration>,
    /// Maximum number of memory items recalled per report section.
    pub recall_limit: usize,
    /// Consolidate episodic memory into long-term summaries before writing.
    pub consolidate_memory: bool,
}

impl Default for ResearchParams {
    fn default() -> Self {
        Self {
            max_concurrent_subtasks: 4,
            subtask_timeout: None,
            recall_limit: 8,
            consolidate_memory: false,
        }
    }
}

impl ResearchParams {
    // ==================== Builder Methods ====================

    pub fn with_max_concurrent_subtasks(mut self, max: usize) -> Self {
        self.max_concurrent_subtasks = max;
        self
    }

    pub fn with_subtask_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.subtask_timeout = timeout;
        self
    }

    pub fn with_recall_limit(mut self, limit: usize) -> Self {
        self.recall_limit = limit;
        self
    }

    pub fn with_consolidate_memory(mut self, enabled: bool) -> Self {
        self.consolidate_memory = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ResearchParams::default();
        assert_eq!(params.max_concurrent_subtasks, 4);
        assert!(params.subtask_timeout.is_none());
        assert_eq!(params.recall_limit, 8);
        assert!(!params.consolidate_memory);
    }

    #[test]
    fn test_builder() {
        let params = ResearchParams::default()
            .with_max_concurrent_subtasks(1)
            .with_subtask_timeout(Some(Duration::from_secs(30)))
            .with_recall_limit(3);

        assert_eq!(params.max_concurrent_subtasks, 1);
        assert_eq!(params.subtask_timeout, Some(Duration::from_secs(30)));
        assert_eq!(params.recall_limit, 3);
    }
}
