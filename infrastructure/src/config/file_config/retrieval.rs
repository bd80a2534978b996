//! Retrieval configuration from TOML (`[retrieval]` section)

use research_domain::core::validation::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Which retrieval backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalProviderKind {
    /// Local JSON corpus
    #[default]
    Corpus,
    /// DuckDuckGo Instant Answer API
    DuckDuckGo,
}

impl FromStr for RetrievalProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "corpus" | "local" => Ok(RetrievalProviderKind::Corpus),
            "duckduckgo" | "ddg" | "web" => Ok(RetrievalProviderKind::DuckDuckGo),
            other => Err(format!("unknown retrieval provider: {}", other)),
        }
    }
}

/// Retrieval configuration from TOML.
///
/// # Example
///
/// ```toml
/// [retrieval]
/// provider = "corpus"           # or "duckduckgo"
/// corpus_path = "./corpus.json"
/// max_results = 5
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    pub provider: String,
    /// JSON file of records for the corpus provider.
    pub corpus_path: Option<PathBuf>,
    /// Maximum records returned per query.
    pub max_results: usize,
    /// HTTP timeout for web providers.
    pub timeout_secs: u64,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            provider: "corpus".to_string(),
            corpus_path: None,
            max_results: 5,
            timeout_secs: 30,
        }
    }
}

impl FileRetrievalConfig {
    /// Parse the provider, falling back to the corpus with a warning.
    pub fn parse_provider(&self) -> (RetrievalProviderKind, Vec<ConfigIssue>) {
        match self.provider.parse::<RetrievalProviderKind>() {
            Ok(kind) => (kind, vec![]),
            Err(_) => (
                RetrievalProviderKind::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "retrieval.provider".to_string(),
                        value: self.provider.clone(),
                        valid_values: vec!["corpus".to_string(), "duckduckgo".to_string()],
                    },
                    format!(
                        "retrieval.provider: unknown value '{}', falling back to 'corpus'",
                        self.provider
                    ),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_provider().1;
        if self.max_results == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidConstraint {
                    field: "retrieval.max_results".to_string(),
                },
                "retrieval.max_results must be >= 1",
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidConstraint {
                    field: "retrieval.timeout_secs".to_string(),
                },
                "retrieval.timeout_secs must be >= 1",
            ));
        }
        issues
    }
}
