//! Progress reporting for research runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use research_application::{ResearchPhase, ResearchProgressNotifier, SubtaskOutcome};
use research_domain::{ResearchStep, Subtask};
use std::sync::Mutex;

/// Reports progress during a research run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: ResearchPhase) -> &'static str {
        match phase {
            ResearchPhase::Planning => "Planning",
            ResearchPhase::Researching => "Researching",
            ResearchPhase::Arbitration => "Arbitrating",
            ResearchPhase::Writing => "Writing",
            ResearchPhase::Reviewing => "Reviewing",
            ResearchPhase::Scoring => "Scoring",
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.phase_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResearchProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: ResearchPhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message("Starting...");

        if let Ok(mut guard) = self.phase_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_phase_complete(&self, phase: ResearchPhase) {
        let taken = self.phase_bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some(pb) = taken {
            pb.finish_with_message(format!(
                "{} complete!",
                Self::phase_display_name(phase).green()
            ));
        }
    }

    fn on_step(&self, subtask: &Subtask, step: &ResearchStep) {
        self.with_bar(|pb| {
            pb.set_message(format!(
                "{} step {} ({} results)",
                subtask.description,
                step.step_number,
                step.observation.record_count()
            ));
        });
    }

    fn on_subtask_complete(&self, outcome: &SubtaskOutcome) {
        self.with_bar(|pb| {
            let status = if outcome.is_success() {
                format!("{} {}", "v".green(), outcome.subtask.description)
            } else {
                format!("{} {}", "x".red(), outcome.subtask.description)
            };
            pb.set_message(status);
            pb.inc(1);
        });
    }
}

/// Simple text-based progress (no progress bars)
pub struct SimpleProgress;

impl ResearchProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: ResearchPhase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold(),
            total_tasks
        );
    }

    fn on_phase_complete(&self, _phase: ResearchPhase) {}

    fn on_subtask_complete(&self, outcome: &SubtaskOutcome) {
        match (&outcome.error, outcome.stop_cause) {
            (Some(error), _) => {
                eprintln!("  {} {} ({})", "x".red(), outcome.subtask, error)
            }
            (None, Some(cause)) => eprintln!(
                "  {} {} ({} steps, {})",
                "v".green(),
                outcome.subtask,
                outcome.steps_taken,
                cause
            ),
            (None, None) => eprintln!("  {} {}", "v".green(), outcome.subtask),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_phase_has_a_display_name() {
        let phases = [
            ResearchPhase::Planning,
            ResearchPhase::Researching,
            ResearchPhase::Arbitration,
            ResearchPhase::Writing,
            ResearchPhase::Reviewing,
            ResearchPhase::Scoring,
        ];
        let names: Vec<_> = phases
            .iter()
            .map(|p| ProgressReporter::phase_display_name(*p))
            .collect();
        assert_eq!(names[4], "Reviewing");
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), phases.len());
    }

    #[test]
    fn test_simple_progress_accepts_every_callback() {
        let progress = SimpleProgress;
        progress.on_phase_start(ResearchPhase::Reviewing, 1);
        progress.on_phase_complete(ResearchPhase::Reviewing);
    }
}
