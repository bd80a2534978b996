//! Run Research use case
//!
//! Orchestrates a full research run:
//!
//! ```text
//! plan ─▶ research subtasks (bounded concurrency) ─▶ arbitrate ─▶ write ─▶ review ─▶ score
//!             │
//!             └─ per subtask: retrieve ─▶ remember ─▶ extract evidence ─▶ should_stop?
//! ```
//!
//! Each subtask owns one [`StoppingPolicy`] and a private working memory.
//! When the subtask stops, its working memory is compressed and the episodic
//! summaries are merged into the run's shared [`MemoryStore`] under a mutex
//! that is never held across an await point.

use crate::config::ResearchConfig;
use crate::ports::evidence::{EvidenceExtractor, MetricEvidence, NoEvidenceExtraction};
use crate::ports::planner::{PlannerError, ResearchPlanner};
use crate::ports::progress::{NoProgress, ResearchPhase, ResearchProgressNotifier};
use crate::ports::report_writer::{ReportDraft, ReportWriter, SectionMaterial, WriterError};
use crate::ports::retrieval::{RetrievalError, RetrievalProvider};
use crate::ports::reviewer::{NoReview, ReportReviewer, ReviewerError};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use research_domain::research::query_for_step;
use research_domain::{
    ArbitrationResult, Arbitrator, DomainError, EvidencePoint, FinalReport, LexicalRanker,
    MemoryItem, MemoryStore, MemoryTier, Observation, RecallRanker, ResearchStep, RetrievalRecord,
    RewardBreakdown, RewardScorer, StepDecision, StopCause, StoppingPolicy, StoppingState,
    Subtask, Summarizer,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during a research run
#[derive(Error, Debug)]
pub enum RunResearchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Research query is empty")]
    EmptyQuery,

    #[error("Planner produced no subtasks")]
    NoSubtasks,

    #[error("Planner error: {0}")]
    Planner(#[from] PlannerError),

    #[error("Writer error: {0}")]
    Writer(#[from] WriterError),

    #[error("Reviewer error: {0}")]
    Reviewer(#[from] ReviewerError),

    #[error("Memory error: {0}")]
    Memory(#[from] DomainError),

    #[error("All subtasks failed")]
    AllSubtasksFailed,

    #[error("Operation cancelled")]
    Cancelled,
}

/// What happened to one subtask.
#[derive(Debug, Clone, Serialize)]
pub struct SubtaskOutcome {
    pub subtask: Subtask,
    /// Steps counted by the stopping policy.
    pub steps_taken: usize,
    /// `None` when the subtask failed before any stop decision.
    pub stop_cause: Option<StopCause>,
    pub steps: Vec<ResearchStep>,
    /// Number of metric observations extracted.
    pub evidence_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubtaskOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Size of the shared memory after the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoryStats {
    pub episodic: usize,
    pub long_term: usize,
}

/// Result of a research run.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchOutcome {
    pub query: String,
    pub subtasks: Vec<SubtaskOutcome>,
    /// Winning value per metric.
    pub arbitrations: BTreeMap<String, ArbitrationResult>,
    /// Arbitration explanation for every metric that had conflicting values.
    pub conflicts: BTreeMap<String, String>,
    pub report: FinalReport,
    pub reward: RewardBreakdown,
    pub memory: MemoryStats,
}

impl ResearchOutcome {
    pub fn failed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| !s.is_success()).count()
    }
}

/// Subtask result plus the evidence it gathered, before merging.
struct SubtaskRun {
    index: usize,
    outcome: SubtaskOutcome,
    evidence: Vec<MetricEvidence>,
}

/// Use case for running a research query end to end
pub struct RunResearchUseCase {
    planner: Arc<dyn ResearchPlanner>,
    retrieval: Arc<dyn RetrievalProvider>,
    writer: Arc<dyn ReportWriter>,
    reviewer: Arc<dyn ReportReviewer>,
    summarizer: Arc<dyn Summarizer>,
    ranker: Arc<dyn RecallRanker>,
    extractor: Arc<dyn EvidenceExtractor>,
    config: ResearchConfig,
    cancellation_token: Option<CancellationToken>,
}

impl RunResearchUseCase {
    pub fn new(
        planner: Arc<dyn ResearchPlanner>,
        retrieval: Arc<dyn RetrievalProvider>,
        writer: Arc<dyn ReportWriter>,
        summarizer: Arc<dyn Summarizer>,
        config: ResearchConfig,
    ) -> Self {
        Self {
            planner,
            retrieval,
            writer,
            reviewer: Arc::new(NoReview),
            summarizer,
            ranker: Arc::new(LexicalRanker),
            extractor: Arc::new(NoEvidenceExtraction),
            config,
            cancellation_token: None,
        }
    }

    /// Replace the default lexical recall ranker
    pub fn with_ranker(mut self, ranker: Arc<dyn RecallRanker>) -> Self {
        self.ranker = ranker;
        self
    }

    /// Review the written report before scoring (pass-through by default)
    pub fn with_reviewer(mut self, reviewer: Arc<dyn ReportReviewer>) -> Self {
        self.reviewer = reviewer;
        self
    }

    /// Extract metric evidence from observations (none by default)
    pub fn with_evidence_extractor(mut self, extractor: Arc<dyn EvidenceExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, query: &str) -> Result<ResearchOutcome, RunResearchError> {
        self.execute_with_progress(query, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        query: &str,
        progress: &dyn ResearchProgressNotifier,
    ) -> Result<ResearchOutcome, RunResearchError> {
        let issues = self.config.validate();
        if ResearchConfig::has_errors(&issues) {
            let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
            return Err(RunResearchError::InvalidConfig(messages.join("; ")));
        }
        let query = query.trim();
        if query.is_empty() {
            return Err(RunResearchError::EmptyQuery);
        }
        self.check_cancelled()?;
        let arbitrator = Arbitrator::new(self.config.authority().clone()).map_err(config_error)?;
        let scorer = RewardScorer::new(self.config.reward().clone()).map_err(config_error)?;
        let store = MemoryStore::new(
            self.config.memory().clone(),
            Arc::clone(&self.summarizer),
            Arc::clone(&self.ranker),
        )
        .map_err(config_error)?;

        info!("Starting research: {}", query);

        // Phase 1: Planning
        progress.on_phase_start(ResearchPhase::Planning, 1);
        let subtasks = self.planner.plan(query).await?;
        progress.on_phase_complete(ResearchPhase::Planning);
        if subtasks.is_empty() {
            return Err(RunResearchError::NoSubtasks);
        }
        info!("Planned {} subtasks", subtasks.len());

        // Phase 2: Research
        let shared = Mutex::new(store);
        let runs = self.phase_research(subtasks, &shared, progress).await;
        self.check_cancelled()?;
        if runs.iter().all(|run| !run.outcome.is_success()) {
            return Err(RunResearchError::AllSubtasksFailed);
        }

        // Phase 3: Arbitration
        let (arbitrations, conflicts) = self.phase_arbitration(&arbitrator, &runs, progress);

        // Phase 4: Writing
        let mut memory = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
        if self.config.params().consolidate_memory {
            let created = memory.consolidate().await?;
            debug!("Consolidated episodic memory into {} long-term items", created);
        }
        let report = self
            .phase_writing(query, &runs, &mut memory, arbitrations.clone(), progress)
            .await?;

        // Phase 5: Review
        progress.on_phase_start(ResearchPhase::Reviewing, 1);
        let report = self.reviewer.review(query, report).await?;
        progress.on_phase_complete(ResearchPhase::Reviewing);

        // Phase 6: Scoring
        progress.on_phase_start(ResearchPhase::Scoring, 1);
        let reward = scorer.score(&report, query);
        progress.on_phase_complete(ResearchPhase::Scoring);
        info!(
            "Report scored: total {:.3} (fact {:.3}, coverage {:.3}, density {:.1}, structure {:.1})",
            reward.total, reward.fact, reward.coverage, reward.density, reward.structure
        );

        Ok(ResearchOutcome {
            query: query.to_string(),
            subtasks: runs.into_iter().map(|run| run.outcome).collect(),
            arbitrations,
            conflicts,
            report,
            reward,
            memory: MemoryStats {
                episodic: memory.len(MemoryTier::Episodic),
                long_term: memory.len(MemoryTier::LongTerm),
            },
        })
    }

    /// Phase 2: Research every subtask, at most `max_concurrent_subtasks` at a time.
    ///
    /// Runs are returned in plan order regardless of completion order.
    async fn phase_research(
        &self,
        subtasks: Vec<Subtask>,
        shared: &Mutex<MemoryStore>,
        progress: &dyn ResearchProgressNotifier,
    ) -> Vec<SubtaskRun> {
        let limit = self.config.params().max_concurrent_subtasks.max(1);
        progress.on_phase_start(ResearchPhase::Researching, subtasks.len());

        let mut runs: Vec<SubtaskRun> = stream::iter(subtasks.into_iter().enumerate())
            .map(|(index, subtask)| self.run_subtask(index, subtask, shared, progress))
            .buffer_unordered(limit)
            .collect()
            .await;
        runs.sort_by_key(|run| run.index);

        progress.on_phase_complete(ResearchPhase::Researching);
        runs
    }

    /// Research one subtask until its stopping policy, the budget, or an error ends it.
    async fn run_subtask(
        &self,
        index: usize,
        subtask: Subtask,
        shared: &Mutex<MemoryStore>,
        progress: &dyn ResearchProgressNotifier,
    ) -> SubtaskRun {
        info!("Researching subtask {}: {}", subtask.id, subtask);

        let mut policy = match StoppingPolicy::new(self.config.stopping().clone()) {
            Ok(policy) => policy,
            Err(e) => {
                let parts = SubtaskOutcomeParts {
                    steps_taken: 0,
                    stop_cause: None,
                    steps: Vec::new(),
                    error: Some(e.to_string()),
                };
                return self.finish_subtask(index, subtask, parts, Vec::new(), progress);
            }
        };

        let mut steps = Vec::new();
        let mut evidence = Vec::new();
        let mut stop_cause = None;
        let mut error = None;
        let mut memory = lock(shared).empty_like();
        let deadline = self
            .config
            .params()
            .subtask_timeout
            .map(|timeout| Instant::now() + timeout);

        loop {
            let step_number = steps.len() + 1;
            let query = query_for_step(&subtask.description, step_number);

            let records = match self.retrieve(&query, deadline).await {
                Err(interrupted) => {
                    info!("Subtask {} {}", subtask.id, interrupted);
                    stop_cause = Some(interrupted);
                    break;
                }
                Ok(Err(e)) => {
                    warn!("Retrieval failed for subtask {}: {}", subtask.id, e);
                    steps.push(ResearchStep {
                        step_number,
                        query,
                        observation: Observation::Error(e.to_string()),
                        information_gain: None,
                        decision: StepDecision::Stop,
                    });
                    error = Some(e.to_string());
                    break;
                }
                Ok(Ok(records)) => records,
            };

            let observation = Observation::Results(records);
            let text = observation.text();
            if !text.is_empty()
                && let Err(e) = memory.add_working(MemoryItem::working(text.as_str())).await
            {
                warn!("Memory update failed for subtask {}: {}", subtask.id, e);
                error = Some(e.to_string());
                break;
            }
            evidence.extend(self.extractor.extract(&subtask, &observation));

            let stop = policy.should_stop(&text);
            let information_gain = match policy.state() {
                StoppingState::StepLimitReached => None,
                _ => policy.last_gain(),
            };
            debug!(
                "Subtask {} step {}: {} records, gain {:?}",
                subtask.id,
                step_number,
                observation.record_count(),
                information_gain
            );

            let step = ResearchStep {
                step_number,
                query,
                observation,
                information_gain,
                decision: if stop {
                    StepDecision::Stop
                } else {
                    StepDecision::Continue
                },
            };
            progress.on_step(&subtask, &step);
            steps.push(step);

            if stop {
                stop_cause = policy.stop_reason().map(StopCause::from);
                break;
            }
        }

        // Flush the private working memory and merge its summaries.
        if error.is_none()
            && let Err(e) = memory.compress().await
        {
            warn!("Memory compression failed for subtask {}: {}", subtask.id, e);
            error = Some(e.to_string());
        }
        let summaries = memory.drain_tier(MemoryTier::Episodic);
        lock(shared).absorb(summaries);

        self.finish_subtask(
            index,
            subtask,
            SubtaskOutcomeParts {
                steps_taken: policy.steps_taken(),
                stop_cause,
                steps,
                error,
            },
            evidence,
            progress,
        )
    }

    fn finish_subtask(
        &self,
        index: usize,
        subtask: Subtask,
        parts: SubtaskOutcomeParts,
        evidence: Vec<MetricEvidence>,
        progress: &dyn ResearchProgressNotifier,
    ) -> SubtaskRun {
        match (&parts.error, parts.stop_cause) {
            (Some(e), _) => warn!("Subtask {} failed: {}", subtask.id, e),
            (None, Some(cause)) => info!(
                "Subtask {} stopped after {} steps: {}",
                subtask.id, parts.steps_taken, cause
            ),
            (None, None) => {}
        }
        let outcome = SubtaskOutcome {
            subtask,
            steps_taken: parts.steps_taken,
            stop_cause: parts.stop_cause,
            steps: parts.steps,
            evidence_count: evidence.len(),
            error: parts.error,
        };
        progress.on_subtask_complete(&outcome);
        SubtaskRun {
            index,
            outcome,
            evidence,
        }
    }

    /// Run one retrieval, racing it against cancellation and the deadline.
    ///
    /// The outer `Err` carries why the subtask was interrupted.
    async fn retrieve(
        &self,
        query: &str,
        deadline: Option<Instant>,
    ) -> Result<Result<Vec<RetrievalRecord>, RetrievalError>, StopCause> {
        let cancelled = async {
            match &self.cancellation_token {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };
        let timed_out = async {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(StopCause::Cancelled),
            _ = timed_out => Err(StopCause::TimedOut),
            result = self.retrieval.search(query) => Ok(result),
        }
    }

    /// Phase 3: Resolve every metric that received evidence.
    fn phase_arbitration(
        &self,
        arbitrator: &Arbitrator,
        runs: &[SubtaskRun],
        progress: &dyn ResearchProgressNotifier,
    ) -> (
        BTreeMap<String, ArbitrationResult>,
        BTreeMap<String, String>,
    ) {
        let mut metrics: BTreeMap<String, Vec<EvidencePoint>> = BTreeMap::new();
        for run in runs {
            for evidence in &run.evidence {
                metrics
                    .entry(evidence.metric.clone())
                    .or_default()
                    .push(evidence.point.clone());
            }
        }

        progress.on_phase_start(ResearchPhase::Arbitration, metrics.len());
        let arbitrations = arbitrator.resolve_metrics_at(&metrics, Utc::now());

        let mut conflicts = BTreeMap::new();
        for (metric, result) in &arbitrations {
            let conflicted = metrics
                .get(metric)
                .is_some_and(|points| distinct_values(points) > 1);
            if conflicted {
                info!("Resolved conflict for {}: {}", metric, result.explanation());
                conflicts.insert(metric.clone(), result.explanation().to_string());
            }
        }
        progress.on_phase_complete(ResearchPhase::Arbitration);
        (arbitrations, conflicts)
    }

    /// Phase 4: Recall memory per subtask and hand everything to the writer.
    async fn phase_writing(
        &self,
        query: &str,
        runs: &[SubtaskRun],
        memory: &mut MemoryStore,
        arbitrations: BTreeMap<String, ArbitrationResult>,
        progress: &dyn ResearchProgressNotifier,
    ) -> Result<FinalReport, RunResearchError> {
        progress.on_phase_start(ResearchPhase::Writing, runs.len());
        let limit = self.config.params().recall_limit;

        let sections = runs
            .iter()
            .map(|run| {
                let subtask = &run.outcome.subtask;
                let recall_query = format!("{} {}", subtask.description, subtask.perspective);
                SectionMaterial {
                    subtask: subtask.clone(),
                    memories: memory.recall_limited(&recall_query, limit).collect(),
                }
            })
            .collect();

        let draft = ReportDraft {
            query: query.to_string(),
            sections,
            arbitrations,
        };
        let report = self.writer.write(&draft).await?;
        progress.on_phase_complete(ResearchPhase::Writing);
        Ok(report)
    }

    fn check_cancelled(&self) -> Result<(), RunResearchError> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Err(RunResearchError::Cancelled);
        }
        Ok(())
    }
}

struct SubtaskOutcomeParts {
    steps_taken: usize,
    stop_cause: Option<StopCause>,
    steps: Vec<ResearchStep>,
    error: Option<String>,
}

/// Domain constructors re-check their configs; keep those failures under `InvalidConfig`.
fn config_error(e: DomainError) -> RunResearchError {
    match e {
        DomainError::InvalidConfig(msg) => RunResearchError::InvalidConfig(msg),
        other => RunResearchError::Memory(other),
    }
}

fn lock(store: &Mutex<MemoryStore>) -> MutexGuard<'_, MemoryStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

fn distinct_values(points: &[EvidencePoint]) -> usize {
    let mut seen: Vec<&Value> = Vec::new();
    for point in points {
        if !seen.contains(&&point.value) {
            seen.push(&point.value);
        }
    }
    seen.len()
}
