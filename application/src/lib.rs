//! Application layer for deep-research
//!
//! This crate contains the research use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ResearchConfig, ResearchParams};
pub use ports::{
    evidence::{EvidenceExtractor, MetricEvidence, NoEvidenceExtraction},
    planner::{PlannerError, ResearchPlanner},
    progress::{NoProgress, ResearchPhase, ResearchProgressNotifier},
    report_writer::{ReportDraft, ReportWriter, SectionMaterial, WriterError},
    retrieval::{RetrievalError, RetrievalProvider},
    reviewer::{NoReview, ReportReviewer, ReviewerError},
};
pub use use_cases::run_research::{
    MemoryStats, ResearchOutcome, RunResearchError, RunResearchUseCase, SubtaskOutcome,
};
