//! Structured configuration findings.
//!
//! Configuration is validated once at startup. Each finding carries a
//! severity: errors abort before any research task starts, warnings are
//! reported and the offending value falls back to its default.
//!
//! # Examples
//!
//! ```
//! use research_domain::core::validation::{ConfigIssue, ConfigIssueCode, Severity, has_errors};
//!
//! let issues = vec![ConfigIssue::error(
//!     ConfigIssueCode::InvalidConstraint { field: "stopping.max_steps".to_string() },
//!     "stopping.max_steps must be >= 1",
//! )];
//! assert!(has_errors(&issues));
//! assert_eq!(issues[0].severity, Severity::Error);
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A numeric value violates its constraint (range, ordering, positivity).
    InvalidConstraint { field: String },
    /// A string value does not name a known variant.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A list that must not be empty is empty.
    EmptyList { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

/// Whether any issue in the list is fatal.
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}
