//! Multi-objective report reward.
//!
//! Four independent sub-scores, combined as a weighted sum:
//!
//! | Sub-score | Range            | Measures                                    |
//! |-----------|------------------|---------------------------------------------|
//! | fact      | `[-0.1, 0.2]`    | citations backed by the reference map       |
//! | coverage  | `[0.0, 1.0]`     | query in title, checklist topics in headings |
//! | density   | `{-1, 0, 1}`     | citations per character, top-level sections |
//! | structure | `{-0.5, 1}`      | top-level headings follow the outline       |
//!
//! The total is unbounded and signed; it is only meaningful for comparing
//! reports scored with the same config.

use super::config::RewardConfig;
use super::entities::FinalReport;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

const CITED_REWARD: f64 = 0.2;
const UNCITED_PENALTY: f64 = -0.1;
const TITLE_MATCH_REWARD: f64 = 0.5;
const KEYWORD_REWARD: f64 = 0.25;
const STRUCTURE_MATCH: f64 = 1.0;
const STRUCTURE_MISMATCH: f64 = -0.5;

/// Every sub-score together with the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub fact: f64,
    pub coverage: f64,
    pub density: f64,
    pub structure: f64,
    pub total: f64,
}

/// Pure, stateless report scorer.
#[derive(Debug, Clone, Default)]
pub struct RewardScorer {
    config: RewardConfig,
}

impl RewardScorer {
    /// Rejects configs that fail [`RewardConfig::validate`].
    pub fn new(config: RewardConfig) -> Result<Self, DomainError> {
        let issues = config.validate();
        if !issues.is_empty() {
            return Err(DomainError::InvalidConfig(issues.join("; ")));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Share-weighted citation validity over all sections and subsections.
    ///
    /// Each citation scores +0.2 if it resolves in `references` and -0.1
    /// otherwise; the sum is divided by the citation count. No citations
    /// scores 0.0.
    pub fn calculate_fact_score(&self, report: &FinalReport) -> f64 {
        let mut score = 0.0;
        let mut total = 0usize;
        for section in report.all_sections() {
            for citation in &section.citations {
                total += 1;
                score += if report.references.contains_key(citation) {
                    CITED_REWARD
                } else {
                    UNCITED_PENALTY
                };
            }
        }
        if total == 0 {
            return 0.0;
        }
        score / total as f64
    }

    /// Relevance of the title to `query` plus checklist coverage of headings.
    pub fn calculate_coverage_score(&self, report: &FinalReport, query: &str) -> f64 {
        let mut score = 0.0;
        if !query.is_empty() && report.title.contains(query) {
            score += TITLE_MATCH_REWARD;
        }

        let titles: Vec<String> = report
            .all_sections()
            .iter()
            .map(|s| s.title.to_lowercase())
            .collect();
        let mut seen: Vec<String> = Vec::new();
        for keyword in self.config.coverage_keywords() {
            let keyword = keyword.to_lowercase();
            if seen.contains(&keyword) {
                continue;
            }
            if titles.iter().any(|t| t.contains(&keyword)) {
                score += KEYWORD_REWARD;
            }
            seen.push(keyword);
        }
        score.min(1.0)
    }

    /// +1.0 when citations per content character exceed the floor, -1.0
    /// otherwise, 0.0 when the report has no content.
    ///
    /// Only top-level sections count; subsections are ignored.
    pub fn calculate_info_density(&self, report: &FinalReport) -> f64 {
        let sections = &report.sections;
        let total_length: usize = sections.iter().map(|s| s.content.chars().count()).sum();
        if total_length == 0 {
            return 0.0;
        }
        let total_citations: usize = sections.iter().map(|s| s.citations.len()).sum();
        let density = total_citations as f64 / total_length as f64;
        if density > self.config.density_floor() {
            1.0
        } else {
            -1.0
        }
    }

    /// +1.0 when the leading top-level titles are exactly the canonical
    /// outline, -0.5 otherwise.
    pub fn calculate_structure_score(&self, report: &FinalReport) -> f64 {
        let outline = self.config.canonical_outline();
        let titles = report.top_level_titles();
        let matches = titles.len() >= outline.len()
            && titles.iter().zip(outline).all(|(title, expected)| *title == expected.as_str());
        if matches {
            STRUCTURE_MATCH
        } else {
            STRUCTURE_MISMATCH
        }
    }

    /// Weighted sum of the four sub-scores.
    pub fn calculate_total_reward(&self, report: &FinalReport, query: &str) -> f64 {
        self.score(report, query).total
    }

    /// All sub-scores and the weighted total.
    pub fn score(&self, report: &FinalReport, query: &str) -> RewardBreakdown {
        let fact = self.calculate_fact_score(report);
        let coverage = self.calculate_coverage_score(report, query);
        let density = self.calculate_info_density(report);
        let structure = self.calculate_structure_score(report);
        let w = self.config.weights();
        RewardBreakdown {
            fact,
            coverage,
            density,
            structure,
            total: w.fact * fact
                + w.coverage * coverage
                + w.density * density
                + w.structure * structure,
        }
    }
}
