//! Research task records: subtasks, retrieval results, observations, steps.

use crate::stopping::StopReason;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of work produced by planning a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub description: String,
    /// Analytical angle, e.g. "Industry", "Competition", "Risk".
    #[serde(default)]
    pub perspective: String,
}

impl Subtask {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        perspective: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            perspective: perspective.into(),
        }
    }
}

impl fmt::Display for Subtask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.perspective.is_empty() {
            write!(f, "{}", self.description)
        } else {
            write!(f, "{} ({})", self.description, self.perspective)
        }
    }
}

/// One result returned by a retrieval provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
}

impl RetrievalRecord {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: url.into(),
        }
    }
}

/// What a research step observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Observation {
    /// Free text (e.g. a summary or a note).
    Text(String),
    /// Structured retrieval results.
    Results(Vec<RetrievalRecord>),
    /// The step failed; the message is kept for the trajectory.
    Error(String),
}

impl Observation {
    /// Text used for memory and information-gain estimation.
    ///
    /// Errors contribute no text, so a failing step never looks informative.
    pub fn text(&self) -> String {
        match self {
            Observation::Text(text) => text.clone(),
            Observation::Results(records) => records
                .iter()
                .map(|r| {
                    if r.title.is_empty() {
                        r.content.clone()
                    } else {
                        format!("{}: {}", r.title, r.content)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Observation::Error(_) => String::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Observation::Error(_))
    }

    /// Number of retrieval records carried, 0 for other kinds.
    pub fn record_count(&self) -> usize {
        match self {
            Observation::Results(records) => records.len(),
            _ => 0,
        }
    }
}

/// Outcome of one step's stopping check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDecision {
    Continue,
    Stop,
}

/// One retrieval iteration of a subtask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchStep {
    pub step_number: usize,
    pub query: String,
    pub observation: Observation,
    /// Gain computed by the stopping policy for this step, if it got that far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_gain: Option<f64>,
    pub decision: StepDecision,
}

/// Why a subtask's retrieval loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopCause {
    Saturated,
    StepLimitReached,
    Cancelled,
    TimedOut,
}

impl From<StopReason> for StopCause {
    fn from(reason: StopReason) -> Self {
        match reason {
            StopReason::Saturated => StopCause::Saturated,
            StopReason::StepLimitReached => StopCause::StepLimitReached,
        }
    }
}

impl fmt::Display for StopCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopCause::Saturated => write!(f, "saturated"),
            StopCause::StepLimitReached => write!(f, "step limit reached"),
            StopCause::Cancelled => write!(f, "cancelled"),
            StopCause::TimedOut => write!(f, "timed out"),
        }
    }
}
