//! Planner configuration from TOML (`[[planner.perspectives]]` tables)

use research_domain::core::validation::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// One perspective the planner turns into a subtask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePerspective {
    /// Subtask template, e.g. "Analyze Market Size".
    pub description: String,
    /// Analytical angle, e.g. "Industry".
    pub perspective: String,
    /// Report section the subtask's findings are written under.
    #[serde(default)]
    pub section: String,
}

impl FilePerspective {
    pub fn new(description: &str, perspective: &str, section: &str) -> Self {
        Self {
            description: description.to_string(),
            perspective: perspective.to_string(),
            section: section.to_string(),
        }
    }
}

/// Planner configuration from TOML.
///
/// # Example
///
/// ```toml
/// [[planner.perspectives]]
/// description = "Analyze Market Size"
/// perspective = "Industry"
/// section = "Industry Chain"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePlannerConfig {
    pub perspectives: Vec<FilePerspective>,
}

impl Default for FilePlannerConfig {
    fn default() -> Self {
        Self {
            perspectives: vec![
                FilePerspective::new("Analyze Market Size", "Industry", "Industry Chain"),
                FilePerspective::new("Evaluate Key Competitors", "Competition", "Company"),
                FilePerspective::new("Assess Supply Chain Risks", "Risk", "Risk"),
                FilePerspective::new("Conclude Investment Value", "Financial", "Conclusion"),
            ],
        }
    }
}

impl FilePlannerConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.perspectives.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyList {
                    field: "planner.perspectives".to_string(),
                },
                "planner.perspectives is empty: no subtasks would be planned",
            ));
        }
        for (i, p) in self.perspectives.iter().enumerate() {
            if p.description.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidConstraint {
                        field: format!("planner.perspectives[{}].description", i),
                    },
                    format!("planner.perspectives[{}].description is empty", i),
                ));
            }
        }
        issues
    }
}
