//! Progress notification port
//!
//! Defines the interface for reporting progress during a research run.

use crate::use_cases::run_research::SubtaskOutcome;
use research_domain::{ResearchStep, Subtask};

/// Stage of a research run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchPhase {
    Planning,
    Researching,
    Arbitration,
    Writing,
    Reviewing,
    Scoring,
}

impl ResearchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchPhase::Planning => "planning",
            ResearchPhase::Researching => "researching",
            ResearchPhase::Arbitration => "arbitration",
            ResearchPhase::Writing => "writing",
            ResearchPhase::Reviewing => "reviewing",
            ResearchPhase::Scoring => "scoring",
        }
    }
}

/// Callback for progress updates during a research run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain logs, ...)
pub trait ResearchProgressNotifier: Send + Sync {
    /// Called when a phase starts; `total_tasks` is the number of units of work
    fn on_phase_start(&self, phase: ResearchPhase, total_tasks: usize);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: ResearchPhase);

    /// Called after each retrieval step of a subtask
    fn on_step(&self, _subtask: &Subtask, _step: &ResearchStep) {}

    /// Called when a subtask finishes (successfully or not)
    fn on_subtask_complete(&self, _outcome: &SubtaskOutcome) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ResearchProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: ResearchPhase, _total_tasks: usize) {}
    fn on_phase_complete(&self, _phase: ResearchPhase) {}
}
