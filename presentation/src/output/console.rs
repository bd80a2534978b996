//! Console output formatter for research results

use colored::Colorize;
use research_application::{ResearchOutcome, SubtaskOutcome};
use research_domain::{ArbitrationResult, FinalReport, ReportSection, RewardBreakdown};
use std::collections::BTreeMap;

/// Formats research results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete research outcome
    pub fn format(outcome: &ResearchOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Deep Research Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Query:".cyan().bold(),
            outcome.query
        ));

        output.push_str(&Self::section_header("Subtasks"));
        for subtask in &outcome.subtasks {
            output.push_str(&Self::subtask_block(subtask));
        }

        if !outcome.arbitrations.is_empty() {
            output.push_str(&Self::section_header("Key Metrics"));
            output.push_str(&Self::format_arbitrations(&outcome.arbitrations));
            if !outcome.conflicts.is_empty() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    "Conflicts resolved:".yellow().bold(),
                    outcome
                        .conflicts
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }

        output.push_str(&Self::section_header("Report"));
        output.push_str(&Self::format_report(&outcome.report));

        output.push_str(&Self::section_header("Reward"));
        output.push_str(&Self::format_reward(&outcome.reward));
        output.push_str(&format!(
            "\n{} {} episodic, {} long-term\n",
            "Memory:".dimmed(),
            outcome.memory.episodic,
            outcome.memory.long_term
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &ResearchOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a concise summary
    pub fn format_summary(outcome: &ResearchOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            format!("=== {} ===", outcome.report.title).cyan().bold()
        ));

        for subtask in &outcome.subtasks {
            output.push_str(&format!("  {}\n", Self::subtask_line(subtask)));
        }

        for (metric, result) in &outcome.arbitrations {
            output.push_str(&format!(
                "  {} {}: {}\n",
                "*".cyan(),
                metric,
                result.explanation()
            ));
        }

        output.push_str(&format!(
            "\n{} {:.3}\n",
            "Reward:".bold(),
            outcome.reward.total
        ));

        output
    }

    /// Format metric resolutions, one per line.
    pub fn format_arbitrations(results: &BTreeMap<String, ArbitrationResult>) -> String {
        results
            .iter()
            .map(|(metric, result)| {
                format!(
                    "  {} {}\n    {}\n",
                    format!("{}:", metric).bold(),
                    result.value(),
                    result.explanation().dimmed()
                )
            })
            .collect()
    }

    /// Format a reward breakdown.
    pub fn format_reward(reward: &RewardBreakdown) -> String {
        format!(
            "  fact      {:>7.3}\n  coverage  {:>7.3}\n  density   {:>7.3}\n  structure {:>7.3}\n  {} {:>7.3}\n",
            reward.fact,
            reward.coverage,
            reward.density,
            reward.structure,
            "total    ".bold(),
            reward.total
        )
    }

    /// Render a report as indented markdown-like text.
    pub fn format_report(report: &FinalReport) -> String {
        let mut output = format!("\n{}\n", format!("# {}", report.title).bold());
        if !report.executive_summary.is_empty() {
            output.push_str(&format!("\n{}\n", report.executive_summary.italic()));
        }
        for section in &report.sections {
            Self::render_section(section, 2, &mut output);
        }
        if !report.references.is_empty() {
            output.push_str(&format!("\n{}\n", "References".bold()));
            for (id, excerpt) in &report.references {
                output.push_str(&format!("  [{}] {}\n", id.dimmed(), excerpt));
            }
        }
        output
    }

    fn render_section(section: &ReportSection, level: usize, output: &mut String) {
        output.push_str(&format!(
            "\n{}\n",
            format!("{} {}", "#".repeat(level), section.title)
                .yellow()
                .bold()
        ));
        if !section.content.is_empty() {
            output.push_str(&section.content);
            output.push('\n');
        }
        if !section.citations.is_empty() {
            output.push_str(&format!(
                "{}\n",
                format!("[{}]", section.citations.join(", ")).dimmed()
            ));
        }
        for sub in &section.subsections {
            Self::render_section(sub, level + 1, output);
        }
    }

    fn subtask_line(subtask: &SubtaskOutcome) -> String {
        match &subtask.error {
            Some(error) => format!("{} {} ({})", "x".red(), subtask.subtask, error),
            None => format!(
                "{} {} ({} steps, {})",
                "v".green(),
                subtask.subtask,
                subtask.steps_taken,
                subtask
                    .stop_cause
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "running".to_string())
            ),
        }
    }

    fn subtask_block(subtask: &SubtaskOutcome) -> String {
        let mut block = format!("\n{}\n", Self::subtask_line(subtask));
        for step in &subtask.steps {
            let gain = step
                .information_gain
                .map(|g| format!("gain {:.3}", g))
                .unwrap_or_else(|| "gain -".to_string());
            block.push_str(&format!(
                "    {} {} ({} results, {})\n",
                format!("{}.", step.step_number).dimmed(),
                step.query,
                step.observation.record_count(),
                gain
            ));
        }
        if subtask.evidence_count > 0 {
            block.push_str(&format!(
                "    {} {}\n",
                "evidence points:".dimmed(),
                subtask.evidence_count
            ));
        }
        block
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
