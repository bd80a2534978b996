//! Stopping configuration from TOML (`[stopping]` section)

use research_domain::StoppingConfig;
use research_domain::core::validation::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Stopping policy configuration from TOML.
///
/// # Example
///
/// ```toml
/// [stopping]
/// max_steps = 20
/// threshold = 0.05
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoppingConfig {
    /// Hard ceiling on retrieval steps per subtask.
    pub max_steps: usize,
    /// Stop once information gain drops below this.
    pub threshold: f64,
}

impl Default for FileStoppingConfig {
    fn default() -> Self {
        let config = StoppingConfig::default();
        Self {
            max_steps: config.max_steps(),
            threshold: config.threshold(),
        }
    }
}

impl FileStoppingConfig {
    /// Convert to domain `StoppingConfig`, returning validation issues.
    pub fn to_stopping_config(&self) -> (StoppingConfig, Vec<ConfigIssue>) {
        match StoppingConfig::try_new(self.max_steps, self.threshold) {
            Ok(config) => (config, vec![]),
            Err(e) => (
                StoppingConfig::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidConstraint {
                        field: "stopping".to_string(),
                    },
                    e.to_string(),
                )],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopping_config_default() {
        let config = FileStoppingConfig::default();
        assert_eq!(config.max_steps, 20);
        assert_eq!(config.threshold, 0.05);
    }

    #[test]
    fn test_zero_max_steps_is_error() {
        let config = FileStoppingConfig {
            max_steps: 0,
            threshold: 0.05,
        };
        let (_, issues) = config.to_stopping_config();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("max_steps"));
    }
}
