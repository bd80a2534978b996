//! Arbitration configuration from TOML (`[arbitration]` section)

use research_domain::AuthorityConfig;
use research_domain::core::validation::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Source authority configuration from TOML.
///
/// # Example
///
/// ```toml
/// [arbitration]
/// authoritative_sources = ["broker", "consulting", "regulator"]
/// high_weight = 0.9
/// low_weight = 0.3
/// decay_rate = 0.95
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileArbitrationConfig {
    /// Source types trusted with `high_weight`.
    pub authoritative_sources: Vec<String>,
    pub high_weight: f64,
    pub low_weight: f64,
    /// Confidence multiplier per month of age.
    pub decay_rate: f64,
}

impl Default for FileArbitrationConfig {
    fn default() -> Self {
        let config = AuthorityConfig::default();
        Self {
            authoritative_sources: config.authoritative_sources().to_vec(),
            high_weight: config.high_weight(),
            low_weight: config.low_weight(),
            decay_rate: config.decay_rate(),
        }
    }
}

impl FileArbitrationConfig {
    /// Convert to domain `AuthorityConfig`, returning validation issues.
    pub fn to_authority_config(&self) -> (AuthorityConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.authoritative_sources.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyList {
                    field: "arbitration.authoritative_sources".to_string(),
                },
                "arbitration.authoritative_sources is empty: every source gets the low weight",
            ));
        }
        match AuthorityConfig::try_new(
            self.authoritative_sources.clone(),
            self.high_weight,
            self.low_weight,
            self.decay_rate,
        ) {
            Ok(config) => (config, issues),
            Err(e) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidConstraint {
                        field: "arbitration".to_string(),
                    },
                    e.to_string(),
                ));
                (AuthorityConfig::default(), issues)
            }
        }
    }
}
