//! Multi-objective reward scoring of finished reports.

pub mod config;
pub mod entities;
pub mod scorer;

pub use config::{RewardConfig, RewardWeights};
pub use entities::{FinalReport, ReportSection};
pub use scorer::{RewardBreakdown, RewardScorer};
