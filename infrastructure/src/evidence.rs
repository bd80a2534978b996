//! Metric evidence from structured retrieval results.
//!
//! A record whose content is JSON contributes evidence. The content may be
//! one object or an array of objects shaped like:
//!
//! ```json
//! { "metric": "market_size", "value": "38B", "source_type": "broker", "date": "2025-06-01" }
//! ```
//!
//! `source_type` and `date` are optional. Dates are RFC 3339 timestamps or
//! plain `YYYY-MM-DD`. Content that is not JSON, and objects without a
//! `metric` or `value`, are skipped.

use chrono::{DateTime, NaiveDate, Utc};
use research_application::{EvidenceExtractor, MetricEvidence};
use research_domain::{EvidencePoint, Observation, Subtask};
use serde::Deserialize;
use tracing::trace;

#[derive(Debug, Deserialize)]
struct RawEvidence {
    metric: String,
    value: serde_json::Value,
    #[serde(default)]
    source_type: String,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPayload {
    One(RawEvidence),
    Many(Vec<RawEvidence>),
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn parse_content(content: &str) -> Vec<MetricEvidence> {
    let trimmed = content.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return Vec::new();
    }
    let raw = match serde_json::from_str::<RawPayload>(trimmed) {
        Ok(RawPayload::One(one)) => vec![one],
        Ok(RawPayload::Many(many)) => many,
        Err(e) => {
            trace!("Skipping non-evidence JSON content: {}", e);
            return Vec::new();
        }
    };
    raw.into_iter()
        .filter(|r| !r.metric.trim().is_empty() && !r.value.is_null())
        .map(|r| {
            let mut point = EvidencePoint::new(r.value, r.source_type);
            if let Some(date) = r.date.as_deref().and_then(parse_date) {
                point = point.with_date(date);
            }
            MetricEvidence::new(r.metric.trim(), point)
        })
        .collect()
}

/// Reads metric evidence embedded as JSON in observation text.
pub struct JsonEvidenceExtractor;

impl EvidenceExtractor for JsonEvidenceExtractor {
    fn extract(&self, _subtask: &Subtask, observation: &Observation) -> Vec<MetricEvidence> {
        match observation {
            Observation::Results(records) => records
                .iter()
                .flat_map(|r| parse_content(&r.content))
                .collect(),
            Observation::Text(text) => parse_content(text),
            Observation::Error(_) => Vec::new(),
        }
    }
}
