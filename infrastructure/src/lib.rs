//! Infrastructure layer for deep-research
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod evidence;
pub mod planner;
pub mod retrieval;
pub mod summarizer;
pub mod writer;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FilePerspective,
    RetrievalProviderKind,
};
pub use evidence::JsonEvidenceExtractor;
pub use planner::{Perspective, PerspectivePlanner};
#[cfg(feature = "web-retrieval")]
pub use retrieval::DuckDuckGoRetrieval;
pub use retrieval::{CorpusError, CorpusRetrieval};
pub use summarizer::ExtractiveSummarizer;
pub use writer::OutlineReportWriter;
