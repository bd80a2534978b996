//! Retrieval adapters implementing [`RetrievalProvider`](research_application::RetrievalProvider).
//!
//! - [`CorpusRetrieval`]: offline, term-matched search over a JSON file of records
//! - `DuckDuckGoRetrieval`: DuckDuckGo Instant Answer API (feature `web-retrieval`)

pub mod corpus;
#[cfg(feature = "web-retrieval")]
pub mod duckduckgo;

pub use corpus::{CorpusError, CorpusRetrieval};
#[cfg(feature = "web-retrieval")]
pub use duckduckgo::DuckDuckGoRetrieval;
