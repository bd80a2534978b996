//! Configuration file loading for deep-research
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DEEP_RESEARCH_<SECTION>__<KEY>` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./research.toml` or `./.research.toml`
//! 4. Global: `$XDG_CONFIG_HOME/deep-research/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileArbitrationConfig, FileConfig, FileMemoryConfig,
    FileOutputConfig, FilePerspective, FilePlannerConfig, FileResearchConfig,
    FileRetrievalConfig, FileRewardConfig, FileRewardWeights, FileStoppingConfig,
    RetrievalProviderKind,
};
pub use loader::ConfigLoader;
