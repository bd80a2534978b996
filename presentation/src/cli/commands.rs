//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for research results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Subtasks, metrics, the full report and its reward
    Full,
    /// One line per subtask plus the reward
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for research_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => research_domain::OutputFormat::Full,
            OutputFormat::Summary => research_domain::OutputFormat::Summary,
            OutputFormat::Json => research_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for deep-research
#[derive(Parser, Debug)]
#[command(name = "deep-research")]
#[command(author, version, about = "Plan, research, arbitrate and score an analysis report")]
#[command(long_about = r#"
Deep Research decomposes a query into subtasks, retrieves evidence for each
until it stops adding information, reconciles conflicting metrics, writes an
outline-ordered report and scores it.

Configuration files are loaded from (in priority order):
1. DEEP_RESEARCH_<SECTION>__<KEY>   Environment overrides
2. --config <path>                   Explicit config file
3. ./research.toml                   Project-level config
4. ~/.config/deep-research/config.toml   Global config

Example:
  deep-research research "humanoid robot industry" --corpus ./corpus.json
  deep-research score --report report.json --query "humanoid robot industry"
  deep-research arbitrate --evidence metrics.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Research a query end to end
    Research {
        /// The research query
        query: String,

        /// JSON corpus for offline retrieval (overrides [retrieval])
        #[arg(long, value_name = "PATH")]
        corpus: Option<PathBuf>,
    },

    /// Score an existing report (JSON)
    Score {
        /// Report file
        #[arg(long, value_name = "PATH")]
        report: PathBuf,

        /// Query the report answers (enables the title match bonus)
        #[arg(long)]
        query: Option<String>,
    },

    /// Resolve conflicting metric evidence (JSON map of metric to points)
    Arbitrate {
        /// Evidence file
        #[arg(long, value_name = "PATH")]
        evidence: PathBuf,
    },
}
