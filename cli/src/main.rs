//! CLI entrypoint for deep-research
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use research_application::{NoProgress, ResearchConfig, RetrievalProvider, RunResearchUseCase};
use research_domain::{Arbitrator, EvidencePoint, FinalReport, OutputFormat, RewardScorer};
use research_infrastructure::{
    ConfigLoader, CorpusRetrieval, ExtractiveSummarizer, FileConfig, JsonEvidenceExtractor,
    OutlineReportWriter, PerspectivePlanner, RetrievalProviderKind,
};
use research_presentation::{Cli, Command, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    let (config, warnings) = file_config.validated()?;
    for issue in &warnings {
        warn!("{}", issue.message);
    }

    if !file_config.output.color {
        colored::control::set_override(false);
    }
    let format = file_config.output.resolve_format(cli.output.map(Into::into));
    let show_progress = file_config.output.progress_enabled(cli.quiet);

    let Some(command) = cli.command else {
        bail!("A command is required. Run with --help for usage.");
    };

    match command {
        Command::Research { query, corpus } => {
            run_research(&file_config, config, &query, corpus, format, show_progress).await
        }
        Command::Score { report, query } => score_report(&config, &report, query, format),
        Command::Arbitrate { evidence } => arbitrate(&config, &evidence, format),
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn build_retrieval(
    file_config: &FileConfig,
    corpus: Option<PathBuf>,
) -> Result<Arc<dyn RetrievalProvider>> {
    let retrieval = &file_config.retrieval;
    let (kind, _) = retrieval.parse_provider();

    let corpus = match (corpus, kind) {
        (Some(path), _) => Some(path),
        (None, RetrievalProviderKind::Corpus) => retrieval.corpus_path.clone(),
        (None, RetrievalProviderKind::DuckDuckGo) => None,
    };

    if let Some(path) = corpus {
        let corpus = CorpusRetrieval::from_path(&path, retrieval.max_results)?;
        info!("Using corpus retrieval ({} records)", corpus.len());
        return Ok(Arc::new(corpus));
    }

    match kind {
        RetrievalProviderKind::Corpus => {
            bail!("No corpus configured. Pass --corpus <PATH> or set retrieval.corpus_path.")
        }
        RetrievalProviderKind::DuckDuckGo => web_retrieval(file_config),
    }
}

#[cfg(feature = "web-retrieval")]
fn web_retrieval(file_config: &FileConfig) -> Result<Arc<dyn RetrievalProvider>> {
    let retrieval = &file_config.retrieval;
    let provider = research_infrastructure::DuckDuckGoRetrieval::new(
        std::time::Duration::from_secs(retrieval.timeout_secs),
        retrieval.max_results,
    )?;
    info!("Using DuckDuckGo retrieval");
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "web-retrieval"))]
fn web_retrieval(_file_config: &FileConfig) -> Result<Arc<dyn RetrievalProvider>> {
    bail!("This build has no web retrieval. Rebuild with --features web-retrieval.")
}

async fn run_research(
    file_config: &FileConfig,
    config: ResearchConfig,
    query: &str,
    corpus: Option<PathBuf>,
    format: OutputFormat,
    show_progress: bool,
) -> Result<()> {
    info!("Starting deep-research");

    // === Dependency Injection ===
    let retrieval = build_retrieval(file_config, corpus)?;
    let planner = PerspectivePlanner::from_config(&file_config.planner.perspectives);
    let writer = OutlineReportWriter::new(
        config.reward().canonical_outline().to_vec(),
        planner.placements(),
    );

    let cancellation = CancellationToken::new();
    let ctrl_c_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling research");
            ctrl_c_token.cancel();
        }
    });

    let use_case = RunResearchUseCase::new(
        Arc::new(planner),
        retrieval,
        Arc::new(writer),
        Arc::new(ExtractiveSummarizer::default()),
        config,
    )
    .with_evidence_extractor(Arc::new(JsonEvidenceExtractor))
    .with_cancellation(cancellation);

    // Progress bars need a terminal; fall back to plain lines when stderr is redirected
    let outcome = if show_progress && std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(query, &progress).await?
    } else if show_progress {
        use_case.execute_with_progress(query, &SimpleProgress).await?
    } else {
        use_case.execute_with_progress(query, &NoProgress).await?
    };

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };
    println!("{}", output);

    Ok(())
}

fn score_report(
    config: &ResearchConfig,
    path: &Path,
    query: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    let report: FinalReport = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse report {}", path.display()))?;

    let scorer = RewardScorer::new(config.reward().clone())?;
    let reward = scorer.score(&report, query.as_deref().unwrap_or(""));

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&reward)?,
        _ => ConsoleFormatter::format_reward(&reward),
    };
    println!("{}", output);
    Ok(())
}

fn arbitrate(config: &ResearchConfig, path: &Path, format: OutputFormat) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read evidence {}", path.display()))?;
    let evidence: BTreeMap<String, Vec<EvidencePoint>> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse evidence {}", path.display()))?;

    let results = Arbitrator::new(config.authority().clone())?.resolve_metrics(&evidence);

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&results)?,
        _ => ConsoleFormatter::format_arbitrations(&results),
    };
    println!("{}", output);
    Ok(())
}
