//! Evidence extraction port
//!
//! Pulls metric observations out of what a research step observed.

use research_domain::{EvidencePoint, Observation, Subtask};

/// One observation of a named metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEvidence {
    pub metric: String,
    pub point: EvidencePoint,
}

impl MetricEvidence {
    pub fn new(metric: impl Into<String>, point: EvidencePoint) -> Self {
        Self {
            metric: metric.into(),
            point,
        }
    }
}

/// Extracts [`MetricEvidence`] from observations.
///
/// Extraction is synchronous and must not fail: text without recognizable
/// evidence yields an empty list.
pub trait EvidenceExtractor: Send + Sync {
    fn extract(&self, subtask: &Subtask, observation: &Observation) -> Vec<MetricEvidence>;
}

/// Extractor that never finds evidence
pub struct NoEvidenceExtraction;

impl EvidenceExtractor for NoEvidenceExtraction {
    fn extract(&self, _subtask: &Subtask, _observation: &Observation) -> Vec<MetricEvidence> {
        Vec::new()
    }
}
