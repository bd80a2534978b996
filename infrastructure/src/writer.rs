//! Outline-ordered report assembly.
//!
//! The writer lays recalled memory out under a fixed outline. The first
//! outline section is the overview: it lists the subtasks and the arbitrated
//! key metrics. Each subtask becomes a subsection of the section its
//! perspective is placed in, citing the memory items it was written from.
//! Perspectives without a placement get their own section after the outline.

use async_trait::async_trait;
use research_application::{ReportDraft, ReportWriter, SectionMaterial, WriterError};
use research_domain::core::text::truncate_chars;
use research_domain::{FinalReport, ReportSection};
use std::collections::HashMap;

const EXCERPT_CHARS: usize = 160;
const EMPTY_SECTION: &str = "No evidence gathered.";

/// Assembles a [`FinalReport`] from a draft without generating prose.
pub struct OutlineReportWriter {
    outline: Vec<String>,
    placements: HashMap<String, String>,
}

impl OutlineReportWriter {
    pub fn new(outline: Vec<String>, placements: HashMap<String, String>) -> Self {
        Self {
            outline,
            placements,
        }
    }

    fn overview(&self, draft: &ReportDraft) -> String {
        let mut lines = vec![format!("Research subtasks for \"{}\":", draft.query)];
        lines.extend(
            draft
                .sections
                .iter()
                .map(|m| format!("- {}", m.subtask)),
        );
        if !draft.arbitrations.is_empty() {
            lines.push(String::new());
            lines.push("Key metrics:".to_string());
            lines.extend(
                draft
                    .arbitrations
                    .iter()
                    .map(|(metric, result)| format!("- {}: {}", metric, result.explanation())),
            );
        }
        lines.join("\n")
    }

    fn subsection(material: &SectionMaterial) -> ReportSection {
        let content = material
            .memories
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let content = if content.is_empty() {
            EMPTY_SECTION.to_string()
        } else {
            content
        };
        ReportSection::new(material.subtask.description.clone(), content)
            .with_citations(material.memories.iter().map(|m| m.id.clone()))
    }

    fn section_for<'a>(&'a self, material: &'a SectionMaterial) -> &'a str {
        match self.placements.get(&material.subtask.perspective) {
            Some(section) if self.outline.contains(section) => section.as_str(),
            _ if material.subtask.perspective.is_empty() => "Other",
            _ => material.subtask.perspective.as_str(),
        }
    }
}

#[async_trait]
impl ReportWriter for OutlineReportWriter {
    async fn write(&self, draft: &ReportDraft) -> Result<FinalReport, WriterError> {
        if draft.sections.is_empty() {
            return Err(WriterError::Failed("no research material".to_string()));
        }

        let mut report = FinalReport::new(format!("Investment Analysis: {}", draft.query));
        report.executive_summary = format!(
            "{} subtasks researched, {} metrics arbitrated.",
            draft.sections.len(),
            draft.arbitrations.len()
        );

        let mut sections: Vec<ReportSection> = self
            .outline
            .iter()
            .map(|title| ReportSection::new(title.clone(), ""))
            .collect();
        if let Some(first) = sections.first_mut() {
            first.content = self.overview(draft);
        }

        for material in &draft.sections {
            for memory in &material.memories {
                report
                    .references
                    .entry(memory.id.clone())
                    .or_insert_with(|| truncate_chars(&memory.content, EXCERPT_CHARS));
            }
            let title = self.section_for(material);
            let index = match sections.iter().position(|s| s.title == title) {
                Some(index) => index,
                None => {
                    sections.push(ReportSection::new(title, ""));
                    sections.len() - 1
                }
            };
            sections[index].subsections.push(Self::subsection(material));
        }

        for section in &mut sections {
            if section.content.is_empty() && section.subsections.is_empty() {
                section.content = EMPTY_SECTION.to_string();
            }
        }

        report.sections = sections;
        Ok(report)
    }
}
