//! Hierarchical research memory.
//!
//! Findings are recorded at three tiers (working, episodic, long-term). The
//! working tier is bounded; summaries are produced by an external
//! [`Summarizer`] and recall ordering by a [`RecallRanker`].

pub mod config;
pub mod entities;
pub mod ports;
pub mod ranker;
pub mod store;

pub use config::{CapacityUnit, MemoryConfig};
pub use entities::{MemoryItem, MemoryTier};
pub use ports::{RecallRanker, SummarizeError, Summarizer};
pub use ranker::LexicalRanker;
pub use store::{MemoryStore, Recall};
