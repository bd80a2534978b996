//! Report data model consumed by the reward scorer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A finished research report.
///
/// `references` maps a citation identifier to its citation text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub title: String,
    #[serde(default)]
    pub executive_summary: String,
    #[serde(default)]
    pub sections: Vec<ReportSection>,
    #[serde(default)]
    pub references: BTreeMap<String, String>,
}

impl FinalReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Depth-first walk over every section and nested subsection.
    pub fn all_sections(&self) -> Vec<&ReportSection> {
        let mut out = Vec::new();
        let mut stack: Vec<&ReportSection> = self.sections.iter().rev().collect();
        while let Some(section) = stack.pop() {
            out.push(section);
            stack.extend(section.subsections.iter().rev());
        }
        out
    }

    /// Titles of the top-level sections, in order.
    pub fn top_level_titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }
}

/// One section of a [`FinalReport`], possibly with nested subsections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub subsections: Vec<ReportSection>,
    #[serde(default)]
    pub citations: Vec<String>,
}

impl ReportSection {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_citations<I, S>(mut self, citations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.citations = citations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_subsection(mut self, subsection: ReportSection) -> Self {
        self.subsections.push(subsection);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections_is_depth_first() {
        let mut report = FinalReport::new("r");
        report.sections = vec![
            ReportSection::new("A", "")
                .with_subsection(ReportSection::new("A.1", ""))
                .with_subsection(
                    ReportSection::new("A.2", "").with_subsection(ReportSection::new("A.2.a", "")),
                ),
            ReportSection::new("B", ""),
        ];
        let titles: Vec<&str> = report
            .all_sections()
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "A.1", "A.2", "A.2.a", "B"]);
        assert_eq!(report.top_level_titles(), vec!["A", "B"]);
    }

    #[test]
    fn test_report_deserializes_with_missing_fields() {
        let report: FinalReport =
            serde_json::from_str(r#"{"title":"t","sections":[{"title":"Overview"}]}"#).unwrap();
        assert_eq!(report.sections[0].title, "Overview");
        assert!(report.sections[0].citations.is_empty());
        assert!(report.references.is_empty());
    }
}
