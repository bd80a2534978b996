//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and
//! application types by [`FileConfig::to_research_config`].

mod arbitration;
mod memory;
mod output;
mod planner;
mod research;
mod retrieval;
mod reward;
mod stopping;

pub use arbitration::FileArbitrationConfig;
pub use memory::FileMemoryConfig;
pub use output::FileOutputConfig;
pub use planner::{FilePerspective, FilePlannerConfig};
pub use research::FileResearchConfig;
pub use retrieval::{FileRetrievalConfig, RetrievalProviderKind};
pub use reward::{FileRewardConfig, FileRewardWeights};
pub use stopping::FileStoppingConfig;

use research_application::ResearchConfig;
use research_domain::core::validation::{ConfigIssue, Severity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when the merged configuration contains fatal issues.
#[derive(Error, Debug)]
#[error("invalid configuration ({} error(s)): {}", .0.len(), .0.join("; "))]
pub struct ConfigValidationError(pub Vec<String>);

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Hierarchical memory settings
    pub memory: FileMemoryConfig,
    /// Stopping policy settings
    pub stopping: FileStoppingConfig,
    /// Source authority settings
    pub arbitration: FileArbitrationConfig,
    /// Report reward settings
    pub reward: FileRewardConfig,
    /// Control loop settings
    pub research: FileResearchConfig,
    /// Retrieval backend settings
    pub retrieval: FileRetrievalConfig,
    /// Planner perspectives
    pub planner: FilePlannerConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Convert to the application `ResearchConfig`, collecting every issue.
    ///
    /// Sections with errors fall back to their defaults in the returned
    /// config; callers must check the issues before using it.
    pub fn to_research_config(&self) -> (ResearchConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let (memory, memory_issues) = self.memory.to_memory_config();
        let (stopping, stopping_issues) = self.stopping.to_stopping_config();
        let (authority, authority_issues) = self.arbitration.to_authority_config();
        let (reward, reward_issues) = self.reward.to_reward_config();
        issues.extend(memory_issues);
        issues.extend(stopping_issues);
        issues.extend(authority_issues);
        issues.extend(reward_issues);

        let config = ResearchConfig::default()
            .with_memory(memory)
            .with_stopping(stopping)
            .with_authority(authority)
            .with_reward(reward)
            .with_params(self.research.to_research_params());
        issues.extend(config.validate());

        (config, issues)
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It covers the
    /// research sections plus retrieval and planner settings.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.to_research_config().1;
        issues.extend(self.retrieval.validate());
        issues.extend(self.planner.validate());
        issues
    }

    /// Build the research config, failing if any issue is an error.
    ///
    /// Warnings are returned alongside the config for the caller to report.
    pub fn validated(
        &self,
    ) -> Result<(ResearchConfig, Vec<ConfigIssue>), ConfigValidationError> {
        let issues = self.validate();
        let errors: Vec<String> = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| i.message.clone())
            .collect();
        if !errors.is_empty() {
            return Err(ConfigValidationError(errors));
        }
        let (config, _) = self.to_research_config();
        let warnings = issues
            .into_iter()
            .filter(|i| i.severity == Severity::Warning)
            .collect();
        Ok((config, warnings))
    }
}
