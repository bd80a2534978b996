//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`ResearchParams`]: control loop settings (concurrency, timeouts, recall)
//! - [`ResearchConfig`]: container of every domain config plus [`ResearchParams`]

pub mod research_config;
pub mod research_params;

pub use research_config::ResearchConfig;
pub use research_params::ResearchParams;
