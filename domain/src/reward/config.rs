//! Reward weights, checklists and thresholds.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Weight of each sub-score in the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardWeights {
    pub fact: f64,
    pub coverage: f64,
    pub density: f64,
    pub structure: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            fact: 1.0,
            coverage: 1.0,
            density: 1.0,
            structure: 1.0,
        }
    }
}

/// Settings for [`RewardScorer`](super::RewardScorer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    weights: RewardWeights,
    coverage_keywords: Vec<String>,
    canonical_outline: Vec<String>,
    density_floor: f64,
}

impl RewardConfig {
    /// Create a validated config.
    pub fn try_new(
        weights: RewardWeights,
        coverage_keywords: Vec<String>,
        canonical_outline: Vec<String>,
        density_floor: f64,
    ) -> Result<Self, DomainError> {
        let config = Self {
            weights,
            coverage_keywords,
            canonical_outline,
            density_floor,
        };
        let issues = config.validate();
        if issues.is_empty() {
            Ok(config)
        } else {
            Err(DomainError::InvalidConfig(issues.join("; ")))
        }
    }

    pub fn weights(&self) -> &RewardWeights {
        &self.weights
    }

    pub fn coverage_keywords(&self) -> &[String] {
        &self.coverage_keywords
    }

    pub fn canonical_outline(&self) -> &[String] {
        &self.canonical_outline
    }

    pub fn density_floor(&self) -> f64 {
        self.density_floor
    }

    pub fn with_weights(mut self, weights: RewardWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_canonical_outline(mut self, outline: Vec<String>) -> Self {
        self.canonical_outline = outline;
        self
    }

    pub fn with_coverage_keywords(mut self, keywords: Vec<String>) -> Self {
        self.coverage_keywords = keywords;
        self
    }

    /// Validate this config, returning a list of issues.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let w = &self.weights;
        for (name, value) in [
            ("fact", w.fact),
            ("coverage", w.coverage),
            ("density", w.density),
            ("structure", w.structure),
        ] {
            if !value.is_finite() {
                issues.push(format!("reward: weights.{} must be finite", name));
            }
        }
        if !self.density_floor.is_finite() || self.density_floor < 0.0 {
            issues.push(format!(
                "reward: density_floor ({}) must be a finite value >= 0",
                self.density_floor
            ));
        }
        if self.coverage_keywords.iter().any(|k| k.trim().is_empty()) {
            issues.push("reward: coverage_keywords must not contain blank entries".to_string());
        }
        issues
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            weights: RewardWeights::default(),
            coverage_keywords: ["market", "competition", "valuation", "risk"]
                .into_iter()
                .map(String::from)
                .collect(),
            canonical_outline: ["Overview", "Industry Chain", "Company", "Risk", "Conclusion"]
                .into_iter()
                .map(String::from)
                .collect(),
            density_floor: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RewardConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.canonical_outline().len(), 5);
        assert_eq!(config.coverage_keywords().len(), 4);
    }

    #[test]
    fn test_negative_density_floor_rejected() {
        let result = RewardConfig::try_new(RewardWeights::default(), vec![], vec![], -0.5);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let config = RewardConfig::default().with_coverage_keywords(vec!["  ".to_string()]);
        assert_eq!(config.validate().len(), 1);
    }
}
