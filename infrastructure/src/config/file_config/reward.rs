//! Reward configuration from TOML (`[reward]` section)

use research_domain::core::validation::{ConfigIssue, ConfigIssueCode};
use research_domain::{RewardConfig, RewardWeights};
use serde::{Deserialize, Serialize};

/// Report reward configuration from TOML.
///
/// # Example
///
/// ```toml
/// [reward]
/// coverage_keywords = ["market", "competition", "valuation", "risk"]
/// canonical_outline = ["Overview", "Industry Chain", "Company", "Risk", "Conclusion"]
/// density_floor = 0.01
///
/// [reward.weights]
/// fact = 1.0
/// coverage = 1.0
/// density = 0.5
/// structure = 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRewardConfig {
    pub weights: FileRewardWeights,
    /// Topics a complete report should have a heading for.
    pub coverage_keywords: Vec<String>,
    /// Expected top-level section titles, in order.
    pub canonical_outline: Vec<String>,
    /// Citations per content character a report must exceed.
    pub density_floor: f64,
}

/// Sub-score weights (`[reward.weights]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRewardWeights {
    pub fact: f64,
    pub coverage: f64,
    pub density: f64,
    pub structure: f64,
}

impl Default for FileRewardWeights {
    fn default() -> Self {
        let w = RewardWeights::default();
        Self {
            fact: w.fact,
            coverage: w.coverage,
            density: w.density,
            structure: w.structure,
        }
    }
}

impl From<FileRewardWeights> for RewardWeights {
    fn from(w: FileRewardWeights) -> Self {
        RewardWeights {
            fact: w.fact,
            coverage: w.coverage,
            density: w.density,
            structure: w.structure,
        }
    }
}

impl Default for FileRewardConfig {
    fn default() -> Self {
        let config = RewardConfig::default();
        Self {
            weights: FileRewardWeights::default(),
            coverage_keywords: config.coverage_keywords().to_vec(),
            canonical_outline: config.canonical_outline().to_vec(),
            density_floor: config.density_floor(),
        }
    }
}

impl FileRewardConfig {
    /// Convert to domain `RewardConfig`, returning validation issues.
    pub fn to_reward_config(&self) -> (RewardConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.canonical_outline.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyList {
                    field: "reward.canonical_outline".to_string(),
                },
                "reward.canonical_outline is empty: every report gets the full structure score",
            ));
        }
        if self.coverage_keywords.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyList {
                    field: "reward.coverage_keywords".to_string(),
                },
                "reward.coverage_keywords is empty: coverage only checks the report title",
            ));
        }
        match RewardConfig::try_new(
            self.weights.into(),
            self.coverage_keywords.clone(),
            self.canonical_outline.clone(),
            self.density_floor,
        ) {
            Ok(config) => (config, issues),
            Err(e) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidConstraint {
                        field: "reward".to_string(),
                    },
                    e.to_string(),
                ));
                (RewardConfig::default(), issues)
            }
        }
    }
}
