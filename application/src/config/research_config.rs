//! Research configuration container.
//!
//! [`ResearchConfig`] groups the domain configuration types and the control
//! loop parameters so they can be validated once at startup and handed to
//! [`RunResearchUseCase`](crate::use_cases::run_research::RunResearchUseCase).

use crate::config::ResearchParams;
use research_domain::core::validation::{ConfigIssue, ConfigIssueCode, has_errors};
use research_domain::{AuthorityConfig, MemoryConfig, RewardConfig, StoppingConfig};

/// Configuration container for a research run.
#[derive(Debug, Clone, Default)]
pub struct ResearchConfig {
    memory: MemoryConfig,
    stopping: StoppingConfig,
    authority: AuthorityConfig,
    reward: RewardConfig,
    params: ResearchParams,
}

impl ResearchConfig {
    pub fn new(
        memory: MemoryConfig,
        stopping: StoppingConfig,
        authority: AuthorityConfig,
        reward: RewardConfig,
        params: ResearchParams,
    ) -> Self {
        Self {
            memory,
            stopping,
            authority,
            reward,
            params,
        }
    }

    // ==================== Accessors ====================

    pub fn memory(&self) -> &MemoryConfig {
        &self.memory
    }

    pub fn stopping(&self) -> &StoppingConfig {
        &self.stopping
    }

    pub fn authority(&self) -> &AuthorityConfig {
        &self.authority
    }

    pub fn reward(&self) -> &RewardConfig {
        &self.reward
    }

    pub fn params(&self) -> &ResearchParams {
        &self.params
    }

    // ==================== Builder Methods ====================

    pub fn with_memory(mut self, memory: MemoryConfig) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_stopping(mut self, stopping: StoppingConfig) -> Self {
        self.stopping = stopping;
        self
    }

    pub fn with_authority(mut self, authority: AuthorityConfig) -> Self {
        self.authority = authority;
        self
    }

    pub fn with_reward(mut self, reward: RewardConfig) -> Self {
        self.reward = reward;
        self
    }

    pub fn with_params(mut self, params: ResearchParams) -> Self {
        self.params = params;
        self
    }

    // ==================== Validation ====================

    /// Validate every section.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let sections = [
            ("memory", self.memory.validate()),
            ("stopping", self.stopping.validate()),
            ("arbitration", self.authority.validate()),
            ("reward", self.reward.validate()),
        ];
        for (field, messages) in sections {
            issues.extend(messages.into_iter().map(|message| {
                ConfigIssue::error(
                    ConfigIssueCode::InvalidConstraint {
                        field: field.to_string(),
                    },
                    message,
                )
            }));
        }

        if self.params.max_concurrent_subtasks == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidConstraint {
                    field: "research.max_concurrent_subtasks".to_string(),
                },
                "research.max_concurrent_subtasks must be >= 1",
            ));
        }
        if self.params.recall_limit == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidConstraint {
                    field: "research.recall_limit".to_string(),
                },
                "research.recall_limit is 0: report sections will have no recalled memory",
            ));
        }
        if self.params.subtask_timeout.is_some_and(|t| t.is_zero()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidConstraint {
                    field: "research.subtask_timeout_secs".to_string(),
                },
                "research.subtask_timeout_secs must be > 0 when set",
            ));
        }
        issues
    }

    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        has_errors(issues)
    }
}
