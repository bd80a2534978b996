//! Source authority and recency settings.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How much each kind of source is trusted, and how fast trust decays.
///
/// Sources listed in `authoritative_sources` get `high_weight`; anything else
/// (including an empty or unknown source type) gets `low_weight`. Matching is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityConfig {
    authoritative_sources: Vec<String>,
    high_weight: f64,
    low_weight: f64,
    decay_rate: f64,
}

impl AuthorityConfig {
    /// Create a validated config.
    pub fn try_new(
        authoritative_sources: Vec<String>,
        high_weight: f64,
        low_weight: f64,
        decay_rate: f64,
    ) -> Result<Self, DomainError> {
        let config = Self {
            authoritative_sources,
            high_weight,
            low_weight,
            decay_rate,
        };
        let issues = config.validate();
        if issues.is_empty() {
            Ok(config)
        } else {
            Err(DomainError::InvalidConfig(issues.join("; ")))
        }
    }

    pub fn authoritative_sources(&self) -> &[String] {
        &self.authoritative_sources
    }

    pub fn high_weight(&self) -> f64 {
        self.high_weight
    }

    pub fn low_weight(&self) -> f64 {
        self.low_weight
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    pub fn with_authoritative_sources(mut self, sources: Vec<String>) -> Self {
        self.authoritative_sources = sources;
        self
    }

    pub fn with_decay_rate(mut self, rate: f64) -> Self {
        self.decay_rate = rate;
        self
    }

    /// Base weight for a source type before recency decay.
    pub fn base_weight(&self, source_type: &str) -> f64 {
        let authoritative = self
            .authoritative_sources
            .iter()
            .any(|s| s.eq_ignore_ascii_case(source_type));
        if authoritative {
            self.high_weight
        } else {
            self.low_weight
        }
    }

    /// Validate this config, returning a list of issues.
    ///
    /// Rules:
    /// - both weights are finite and `> 0`
    /// - `0 < decay_rate < 1`
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (name, weight) in [
            ("high_weight", self.high_weight),
            ("low_weight", self.low_weight),
        ] {
            if !weight.is_finite() || weight <= 0.0 {
                issues.push(format!("arbitration: {} ({}) must be > 0", name, weight));
            }
        }
        if !(self.decay_rate > 0.0 && self.decay_rate < 1.0) {
            issues.push(format!(
                "arbitration: decay_rate ({}) must be between 0 and 1 (exclusive)",
                self.decay_rate
            ));
        }
        issues
    }
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            authoritative_sources: vec!["broker".to_string(), "consulting".to_string()],
            high_weight: 0.9,
            low_weight: 0.3,
            decay_rate: 0.95,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let config = AuthorityConfig::default();
        assert_eq!(config.base_weight("broker"), 0.9);
        assert_eq!(config.base_weight("Consulting"), 0.9);
        assert_eq!(config.base_weight("blog"), 0.3);
        assert_eq!(config.base_weight(""), 0.3);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_decay_rate_bounds() {
        assert!(AuthorityConfig::default().with_decay_rate(1.0).validate().len() == 1);
        assert!(AuthorityConfig::default().with_decay_rate(0.0).validate().len() == 1);
        assert!(AuthorityConfig::try_new(vec![], 0.9, 0.3, 0.5).is_ok());
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let err = AuthorityConfig::try_new(vec![], 0.9, 0.0, 0.95).unwrap_err();
        assert!(err.to_string().contains("low_weight"));
    }
}
