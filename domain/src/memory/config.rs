//! Memory capacity and consolidation settings.

use crate::core::error::DomainError;
use crate::core::text::estimate_tokens;
use serde::{Deserialize, Serialize};

/// Unit in which the working-tier capacity is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityUnit {
    /// Number of items
    Items,
    /// Estimated tokens of all item contents
    #[default]
    Tokens,
}

impl CapacityUnit {
    /// Size of a single content payload in this unit.
    pub fn measure(&self, content: &str) -> usize {
        match self {
            CapacityUnit::Items => 1,
            CapacityUnit::Tokens => estimate_tokens(content),
        }
    }
}

impl std::str::FromStr for CapacityUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "items" | "item" => Ok(CapacityUnit::Items),
            "tokens" | "token" => Ok(CapacityUnit::Tokens),
            other => Err(format!("unknown capacity unit: {}", other)),
        }
    }
}

/// Settings for [`MemoryStore`](super::MemoryStore).
///
/// Four knobs:
/// - `capacity` / `unit`: working tier is compressed once its size exceeds `capacity`
/// - `branching_factor`: how many items one consolidation summary covers
/// - `max_depth`: how many summary levels consolidation may build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    capacity: usize,
    unit: CapacityUnit,
    branching_factor: usize,
    max_depth: usize,
}

impl MemoryConfig {
    /// Create a validated config.
    pub fn try_new(
        capacity: usize,
        unit: CapacityUnit,
        branching_factor: usize,
        max_depth: usize,
    ) -> Result<Self, DomainError> {
        let config = Self {
            capacity,
            unit,
            branching_factor,
            max_depth,
        };
        let issues = config.validate();
        if issues.is_empty() {
            Ok(config)
        } else {
            Err(DomainError::InvalidConfig(issues.join("; ")))
        }
    }

    /// Capacity measured in items, other knobs at their defaults.
    pub fn items(capacity: usize) -> Self {
        Self {
            capacity,
            unit: CapacityUnit::Items,
            ..Self::default()
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn unit(&self) -> CapacityUnit {
        self.unit
    }

    pub fn branching_factor(&self) -> usize {
        self.branching_factor
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn with_branching_factor(mut self, branching_factor: usize) -> Self {
        self.branching_factor = branching_factor;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Validate this config, returning a list of issues.
    ///
    /// Rules:
    /// - `capacity >= 1`
    /// - `branching_factor >= 2`
    /// - `max_depth >= 1`
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.capacity < 1 {
            issues.push("memory: capacity must be >= 1".to_string());
        }
        if self.branching_factor < 2 {
            issues.push(format!(
                "memory: branching_factor ({}) must be >= 2",
                self.branching_factor
            ));
        }
        if self.max_depth < 1 {
            issues.push("memory: max_depth must be >= 1".to_string());
        }
        issues
    }
}

impl Default for MemoryConfig {
    /// Default: 4000 tokens of working memory, summaries over 4 items, 3 levels.
    fn default() -> Self {
        Self {
            capacity: 4000,
            unit: CapacityUnit::Tokens,
            branching_factor: 4,
            max_depth: 3,
        }
    }
}
