//! Evidence conflict arbitration by authority, recency and consensus.

pub mod arbitrator;
pub mod config;
pub mod entities;

pub use arbitrator::Arbitrator;
pub use config::AuthorityConfig;
pub use entities::{ArbitrationResult, EvidencePoint};
