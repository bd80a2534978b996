//! Evidence conflict resolution.
//!
//! When several sources report different values for the same metric, the
//! [`Arbitrator`] picks one by combining source authority, recency and
//! agreement between sources:
//!
//! ```text
//! confidence = base_weight(source_type) * decay_rate ^ age_months
//! score      = confidence * (1 + 0.2 * (consensus - 1))
//! ```
//!
//! The highest score wins; among equal scores the earliest point wins.

use super::config::AuthorityConfig;
use super::entities::{ArbitrationResult, EvidencePoint};
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Score boost per additional source agreeing on the same value.
const CONSENSUS_BOOST: f64 = 0.2;

const DAYS_PER_MONTH: f64 = 30.0;

/// Stateless, thread-safe evidence arbitrator.
#[derive(Debug, Clone, Default)]
pub struct Arbitrator {
    config: AuthorityConfig,
}

impl Arbitrator {
    /// Rejects configs that fail [`AuthorityConfig::validate`]; a decay rate
    /// outside `(0, 1)` would stop confidence from falling with age.
    pub fn new(config: AuthorityConfig) -> Result<Self, DomainError> {
        let issues = config.validate();
        if !issues.is_empty() {
            return Err(DomainError::InvalidConfig(issues.join("; ")));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }

    /// Confidence in one observation, relative to the current time.
    pub fn confidence(&self, source_type: &str, date: Option<DateTime<Utc>>) -> f64 {
        self.confidence_at(source_type, date, Utc::now())
    }

    /// Confidence in one observation, relative to `now`.
    ///
    /// A missing date counts as `now`; dates after `now` are not penalized.
    pub fn confidence_at(
        &self,
        source_type: &str,
        date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> f64 {
        let age_months = date
            .map(|d| (now - d).num_seconds().max(0) as f64 / 86_400.0 / DAYS_PER_MONTH)
            .unwrap_or(0.0);
        self.config.base_weight(source_type) * self.config.decay_rate().powf(age_months)
    }

    /// Pick the most trustworthy of `points`, relative to the current time.
    pub fn resolve_conflict(&self, points: &[EvidencePoint]) -> Option<ArbitrationResult> {
        self.resolve_conflict_at(points, Utc::now())
    }

    /// Pick the most trustworthy of `points`, relative to `now`.
    ///
    /// Returns `None` for empty input.
    pub fn resolve_conflict_at(
        &self,
        points: &[EvidencePoint],
        now: DateTime<Utc>,
    ) -> Option<ArbitrationResult> {
        let tallies = tally(points);
        let consensus_of = |value: &Value| {
            tallies
                .iter()
                .find(|(v, _)| *v == value)
                .map(|(_, count)| *count)
                .unwrap_or(0)
        };

        let mut best: Option<(usize, usize, f64)> = None;
        for (index, point) in points.iter().enumerate() {
            let consensus = consensus_of(&point.value);
            let confidence = self.confidence_at(&point.source_type, point.date, now);
            let score = confidence * (1.0 + CONSENSUS_BOOST * (consensus as f64 - 1.0));
            match best {
                Some((_, _, best_score)) if score <= best_score => {}
                _ => best = Some((index, consensus, score)),
            }
        }

        let (index, consensus, score) = best?;
        let winner = points[index].clone();
        let explanation = explain(&winner, consensus, points.len(), score, &tallies);
        Some(ArbitrationResult::new(winner, explanation, consensus, score))
    }

    /// Resolve every metric, relative to the current time.
    pub fn resolve_metrics(
        &self,
        metrics: &BTreeMap<String, Vec<EvidencePoint>>,
    ) -> BTreeMap<String, ArbitrationResult> {
        self.resolve_metrics_at(metrics, Utc::now())
    }

    /// Resolve every metric relative to `now`. Metrics without points are skipped.
    pub fn resolve_metrics_at(
        &self,
        metrics: &BTreeMap<String, Vec<EvidencePoint>>,
        now: DateTime<Utc>,
    ) -> BTreeMap<String, ArbitrationResult> {
        metrics
            .iter()
            .filter_map(|(metric, points)| {
                self.resolve_conflict_at(points, now)
                    .map(|result| (metric.clone(), result))
            })
            .collect()
    }
}

/// Distinct values with their counts, in first-seen order.
fn tally(points: &[EvidencePoint]) -> Vec<(&Value, usize)> {
    let mut tallies: Vec<(&Value, usize)> = Vec::new();
    for point in points {
        match tallies.iter_mut().find(|(v, _)| **v == point.value) {
            Some((_, count)) => *count += 1,
            None => tallies.push((&point.value, 1)),
        }
    }
    tallies
}

fn explain(
    winner: &EvidencePoint,
    consensus: usize,
    total: usize,
    score: f64,
    tallies: &[(&Value, usize)],
) -> String {
    let source = if winner.source_type.is_empty() {
        "unknown"
    } else {
        winner.source_type.as_str()
    };
    let mut explanation = format!(
        "Selected value {} from {} source (consensus: {} of {} points agree, score {:.3})",
        display_value(&winner.value),
        source,
        consensus,
        total,
        score
    );
    if tallies.len() > 1 {
        let dissenting: Vec<String> = tallies
            .iter()
            .filter(|(v, _)| **v != winner.value)
            .map(|(v, _)| display_value(v))
            .collect();
        explanation.push_str("; dissenting values: ");
        explanation.push_str(&dissenting.join(", "));
    }
    explanation
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_new_rejects_decay_rate_above_one() {
        let result = Arbitrator::new(AuthorityConfig::default().with_decay_rate(1.5));
        match result {
            Err(DomainError::InvalidConfig(msg)) => assert!(msg.contains("decay_rate")),
            _ => panic!("expected InvalidConfig"),
        }
    }

    #[test]
    fn test_new_accepts_valid_decay_rate() {
        let arbitrator = Arbitrator::new(AuthorityConfig::default().with_decay_rate(0.9)).unwrap();
        let fresh = arbitrator.confidence_at("broker", Some(now()), now());
        let old = arbitrator.confidence_at("broker", Some(now() - Duration::days(360)), now());
        assert!(old < fresh);
    }

    fn point(value: Value, source: &str) -> EvidencePoint {
        EvidencePoint {
            value,
            source_type: source.to_string(),
            date: Some(now()),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ==================== Confidence ====================

    #[test]
    fn test_confidence_at_zero_age() {
        let arbitrator = Arbitrator::default();
        assert!(approx(arbitrator.confidence_at("broker", Some(now()), now()), 0.9));
        assert!(approx(arbitrator.confidence_at("forum", Some(now()), now()), 0.3));
    }

    #[test]
    fn test_missing_date_means_no_decay() {
        let arbitrator = Arbitrator::default();
        assert!(approx(arbitrator.confidence_at("broker", None, now()), 0.9));
    }

    #[test]
    fn test_future_date_is_not_penalized_or_boosted() {
        let arbitrator = Arbitrator::default();
        let future = now() + Duration::days(90);
        assert!(approx(arbitrator.confidence_at("broker", Some(future), now()), 0.9));
    }

    #[test]
    fn test_older_evidence_is_worth_strictly_less() {
        let arbitrator = Arbitrator::default();
        let mut previous = arbitrator.confidence_at("broker", Some(now()), now());
        for months in 1..=36 {
            let date = now() - Duration::days(30 * months);
            let confidence = arbitrator.confidence_at("broker", Some(date), now());
            assert!(confidence < previous);
            assert!(confidence > 0.0);
            previous = confidence;
        }
    }

    #[test]
    fn test_one_month_decay() {
        let arbitrator = Arbitrator::default();
        let date = now() - Duration::days(30);
        assert!(approx(
            arbitrator.confidence_at("broker", Some(date), now()),
            0.9 * 0.95
        ));
    }

    // ==================== Conflict resolution ====================

    #[test]
    fn test_empty_input_returns_none() {
        assert!(Arbitrator::default().resolve_conflict(&[]).is_none());
    }

    #[test]
    fn test_single_point_has_no_dissent() {
        let result = Arbitrator::default()
            .resolve_conflict_at(&[point(json!(42), "broker")], now())
            .unwrap();
        assert_eq!(result.value(), &json!(42));
        assert_eq!(result.consensus(), 1);
        assert!(result.explanation().contains("42"));
        assert!(!result.explanation().contains("dissenting"));
    }

    #[test]
    fn test_high_authority_outlier_beats_three_low_sources() {
        // low: 0.3 * (1 + 0.2 * 2) = 0.42 < high: 0.9 * 1.0
        let points = vec![
            point(json!(10), "blog"),
            point(json!(10), "news"),
            point(json!(10), "forum"),
            point(json!(20), "broker"),
        ];
        let result = Arbitrator::default()
            .resolve_conflict_at(&points, now())
            .unwrap();
        assert_eq!(result.value(), &json!(20));
        assert_eq!(result.source_type(), "broker");
        assert_eq!(result.consensus(), 1);
        assert!(approx(result.score(), 0.9));
        assert!(result.explanation().contains("dissenting values: 10"));
    }

    #[test]
    fn test_consensus_overtakes_authority_past_crossover() {
        // 12 agreeing low sources: 0.3 * (1 + 0.2 * 11) = 0.96 > 0.9
        let mut points: Vec<EvidencePoint> =
            (0..12).map(|_| point(json!(10), "blog")).collect();
        points.push(point(json!(20), "broker"));
        let result = Arbitrator::default()
            .resolve_conflict_at(&points, now())
            .unwrap();
        assert_eq!(result.value(), &json!(10));
        assert_eq!(result.consensus(), 12);
        assert!(approx(result.score(), 0.96));
    }

    #[test]
    fn test_tie_break_keeps_first_maximal_point() {
        let first = EvidencePoint {
            value: json!("a"),
            source_type: "broker".to_string(),
            date: Some(now()),
        };
        let second = EvidencePoint {
            value: json!("b"),
            source_type: "consulting".to_string(),
            date: Some(now()),
        };
        let arbitrator = Arbitrator::default();
        let result = arbitrator
            .resolve_conflict_at(&[first.clone(), second.clone()], now())
            .unwrap();
        assert_eq!(result.value(), &json!("a"));

        let result = arbitrator
            .resolve_conflict_at(&[second, first], now())
            .unwrap();
        assert_eq!(result.value(), &json!("b"));
    }

    #[test]
    fn test_dissenting_values_listed_in_first_seen_order() {
        let points = vec![
            point(json!("38B"), "forum"),
            point(json!("40B"), "broker"),
            point(json!("35B"), "news"),
            point(json!("38B"), "blog"),
        ];
        let result = Arbitrator::default()
            .resolve_conflict_at(&points, now())
            .unwrap();
        assert_eq!(result.value(), &json!("40B"));
        assert!(result.explanation().ends_with("dissenting values: 38B, 35B"));
    }

    #[test]
    fn test_unknown_source_defaults_to_low_authority() {
        let points = vec![point(json!(1), ""), point(json!(2), "consulting")];
        let result = Arbitrator::default()
            .resolve_conflict_at(&points, now())
            .unwrap();
        assert_eq!(result.value(), &json!(2));
    }

    #[test]
    fn test_resolve_metrics_skips_empty_and_orders_by_name() {
        let mut metrics = BTreeMap::new();
        metrics.insert("valuation".to_string(), vec![point(json!(5), "broker")]);
        metrics.insert("market_size".to_string(), vec![point(json!(38), "news")]);
        metrics.insert("headcount".to_string(), vec![]);

        let results = Arbitrator::default().resolve_metrics_at(&metrics, now());
        let names: Vec<&str> = results.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["market_size", "valuation"]);
    }
}
