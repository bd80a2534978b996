//! Evidence observations and arbitration outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One observed value for a metric, with where it came from and when.
///
/// `value` is compared by equality only; it may be a number, a string or any
/// other JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidencePoint {
    pub value: Value,
    #[serde(default)]
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl EvidencePoint {
    pub fn new(value: impl Into<Value>, source_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source_type: source_type.into(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// The evidence point selected as most trustworthy, with the reasoning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrationResult {
    #[serde(flatten)]
    point: EvidencePoint,
    explanation: String,
    consensus: usize,
    score: f64,
}

impl ArbitrationResult {
    pub(crate) fn new(
        point: EvidencePoint,
        explanation: String,
        consensus: usize,
        score: f64,
    ) -> Self {
        Self {
            point,
            explanation,
            consensus,
            score,
        }
    }

    pub fn point(&self) -> &EvidencePoint {
        &self.point
    }

    pub fn value(&self) -> &Value {
        &self.point.value
    }

    pub fn source_type(&self) -> &str {
        &self.point.source_type
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.point.date
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// How many input points shared the winning value.
    pub fn consensus(&self) -> usize {
        self.consensus
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_evidence_point_deserializes_without_optional_fields() {
        let point: EvidencePoint = serde_json::from_value(json!({ "value": 42 })).unwrap();
        assert_eq!(point.value, json!(42));
        assert_eq!(point.source_type, "");
        assert!(point.date.is_none());
    }

    #[test]
    fn test_result_serializes_point_fields_flat() {
        let result = ArbitrationResult::new(
            EvidencePoint::new(20, "broker"),
            "Selected 20".to_string(),
            1,
            0.9,
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["value"], json!(20));
        assert_eq!(json["source_type"], json!("broker"));
        assert_eq!(json["explanation"], json!("Selected 20"));
        assert_eq!(json["consensus"], json!(1));
    }
}
