//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Memory item not found: {0}")]
    ItemNotFound(String),

    #[error("Memory item {0} is already in the long-term tier")]
    AlreadyLongTerm(String),

    #[error("Summarizer failed: {0}")]
    Summarizer(#[from] crate::memory::SummarizeError),
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidConfig`] error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        DomainError::InvalidConfig(message.into())
    }

    /// Check if this error was raised while validating configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, DomainError::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let error = DomainError::invalid_config("max_steps must be >= 1");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: max_steps must be >= 1"
        );
    }

    #[test]
    fn test_is_config_error_check() {
        assert!(DomainError::invalid_config("x").is_config_error());
        assert!(!DomainError::ItemNotFound("m-1".to_string()).is_config_error());
        assert!(!DomainError::AlreadyLongTerm("m-1".to_string()).is_config_error());
    }
}
