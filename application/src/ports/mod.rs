//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod evidence;
pub mod planner;
pub mod progress;
pub mod report_writer;
pub mod retrieval;
pub mod reviewer;
