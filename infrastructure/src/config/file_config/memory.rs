//! Memory configuration from TOML (`[memory]` section)

use research_domain::core::validation::{ConfigIssue, ConfigIssueCode};
use research_domain::{CapacityUnit, MemoryConfig};
use serde::{Deserialize, Serialize};

/// Memory configuration from TOML.
///
/// # Example
///
/// ```toml
/// [memory]
/// capacity = 4000
/// unit = "tokens"      # or "items"
/// branching_factor = 4
/// max_depth = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMemoryConfig {
    /// Working tier is compressed once its size exceeds this.
    pub capacity: usize,
    /// Unit of `capacity`: "tokens" or "items".
    pub unit: String,
    /// Items covered by one consolidation summary.
    pub branching_factor: usize,
    /// Maximum number of consolidation levels.
    pub max_depth: usize,
}

impl Default for FileMemoryConfig {
    fn default() -> Self {
        let config = MemoryConfig::default();
        Self {
            capacity: config.capacity(),
            unit: "tokens".to_string(),
            branching_factor: config.branching_factor(),
            max_depth: config.max_depth(),
        }
    }
}

impl FileMemoryConfig {
    /// Parse the capacity unit, falling back to tokens with a warning.
    pub fn parse_unit(&self) -> (CapacityUnit, Vec<ConfigIssue>) {
        match self.unit.parse::<CapacityUnit>() {
            Ok(unit) => (unit, vec![]),
            Err(_) => (
                CapacityUnit::Tokens,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "memory.unit".to_string(),
                        value: self.unit.clone(),
                        valid_values: vec!["tokens".to_string(), "items".to_string()],
                    },
                    format!(
                        "memory.unit: unknown value '{}', falling back to 'tokens'",
                        self.unit
                    ),
                )],
            ),
        }
    }

    /// Convert to domain `MemoryConfig`, returning validation issues.
    ///
    /// Constraint violations are errors; the returned config is then the default.
    pub fn to_memory_config(&self) -> (MemoryConfig, Vec<ConfigIssue>) {
        let (unit, mut issues) = self.parse_unit();
        match MemoryConfig::try_new(self.capacity, unit, self.branching_factor, self.max_depth) {
            Ok(config) => (config, issues),
            Err(e) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidConstraint {
                        field: "memory".to_string(),
                    },
                    e.to_string(),
                ));
                (MemoryConfig::default(), issues)
            }
        }
    }
}
