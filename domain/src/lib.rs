//! Domain layer for deep-research
//!
//! This crate contains the decision-and-scoring core of the research pipeline.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Memory
//!
//! Findings live in three tiers. The working tier is bounded and compressed
//! into episodic summaries; episodic summaries consolidate into long-term
//! knowledge. Summarizing and ranking are delegated to ports.
//!
//! ## Stopping
//!
//! Each research task owns one [`StoppingPolicy`] that stops the task on a
//! hard step ceiling or once new observations stop adding information.
//!
//! ## Arbitration
//!
//! Conflicting values for one metric are resolved by source authority,
//! recency decay and consensus between sources.
//!
//! ## Reward
//!
//! Finished reports are scored on citation validity, topic coverage,
//! information density and outline structure.

pub mod arbitration;
pub mod config;
pub mod core;
pub mod memory;
pub mod research;
pub mod reward;
pub mod stopping;

// Re-export commonly used types
pub use arbitration::{ArbitrationResult, Arbitrator, AuthorityConfig, EvidencePoint};
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use memory::{
    CapacityUnit, LexicalRanker, MemoryConfig, MemoryItem, MemoryStore, MemoryTier, Recall,
    RecallRanker, SummarizeError, Summarizer,
};
pub use research::{
    Observation, ResearchStep, RetrievalRecord, StepDecision, StopCause, Subtask,
};
pub use reward::{FinalReport, ReportSection, RewardBreakdown, RewardConfig, RewardScorer, RewardWeights};
pub use stopping::{InformationState, StopReason, StoppingConfig, StoppingPolicy, StoppingState};
