//! Information-saturation stopping policy.
//!
//! One [`StoppingPolicy`] watches one research task. Every retrieval step
//! reports what it observed; the policy answers whether the task should stop,
//! either because the step ceiling was hit or because the observation added
//! too little new information.
//!
//! ```text
//!             should_stop()
//!  Exploring ──────────────┬──▶ StepLimitReached   (steps_taken >= max_steps)
//!      ▲                   └──▶ Saturated          (gain < threshold)
//!      └── gain >= threshold
//! ```

use super::information::InformationState;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Limits for a [`StoppingPolicy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoppingConfig {
    max_steps: usize,
    threshold: f64,
}

impl StoppingConfig {
    /// Create a validated config.
    pub fn try_new(max_steps: usize, threshold: f64) -> Result<Self, DomainError> {
        let config = Self {
            max_steps,
            threshold,
        };
        let issues = config.validate();
        if issues.is_empty() {
            Ok(config)
        } else {
            Err(DomainError::InvalidConfig(issues.join("; ")))
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Validate this config, returning a list of issues.
    ///
    /// Rules:
    /// - `max_steps >= 1`
    /// - `threshold` is finite and `>= 0`
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.max_steps < 1 {
            issues.push("stopping: max_steps must be >= 1".to_string());
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            issues.push(format!(
                "stopping: threshold ({}) must be a finite value >= 0",
                self.threshold
            ));
        }
        issues
    }
}

impl Default for StoppingConfig {
    /// Default: at most 20 steps, stop once gain drops below 0.05.
    fn default() -> Self {
        Self {
            max_steps: 20,
            threshold: 0.05,
        }
    }
}

/// Why a policy decided to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Information gain fell below the threshold.
    Saturated,
    /// The hard step ceiling was reached.
    StepLimitReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Saturated => write!(f, "saturated"),
            StopReason::StepLimitReached => write!(f, "step limit reached"),
        }
    }
}

/// Lifecycle of a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoppingState {
    Exploring,
    Saturated,
    StepLimitReached,
}

impl StoppingState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StoppingState::Exploring)
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            StoppingState::Exploring => None,
            StoppingState::Saturated => Some(StopReason::Saturated),
            StoppingState::StepLimitReached => Some(StopReason::StepLimitReached),
        }
    }
}

/// Per-task convergence detector.
///
/// Not shareable across tasks and not reusable: construct one per task.
///
/// # Example
///
/// ```
/// use research_domain::stopping::{StoppingConfig, StoppingPolicy, StopReason};
///
/// let config = StoppingConfig::try_new(3, 0.05).unwrap();
/// let mut policy = StoppingPolicy::new(config).unwrap();
///
/// assert!(!policy.should_stop("humanoid robot market size"));
/// assert!(policy.should_stop("humanoid robot market size")); // nothing new
/// assert_eq!(policy.stop_reason(), Some(StopReason::Saturated));
/// assert_eq!(policy.steps_taken(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StoppingPolicy {
    config: StoppingConfig,
    information: InformationState,
    steps_taken: usize,
    state: StoppingState,
    last_gain: Option<f64>,
}

impl StoppingPolicy {
    /// Create a policy, rejecting invalid limits up front.
    pub fn new(config: StoppingConfig) -> Result<Self, DomainError> {
        let issues = config.validate();
        if !issues.is_empty() {
            return Err(DomainError::InvalidConfig(issues.join("; ")));
        }
        Ok(Self {
            config,
            information: InformationState::new(),
            steps_taken: 0,
            state: StoppingState::Exploring,
            last_gain: None,
        })
    }

    /// Estimate how much `new_info` adds to what this task already covers,
    /// then fold it into the covered state.
    ///
    /// The estimate is the share of `new_info`'s term occurrences that were
    /// not covered before. Repeating the same (or a near-duplicate) input can
    /// therefore never raise the gain.
    pub fn calculate_information_gain(&mut self, new_info: &str) -> f64 {
        let gain = self.information.novelty(new_info);
        self.information.absorb(new_info);
        self.last_gain = Some(gain);
        gain
    }

    /// Same estimate as [`calculate_information_gain`](Self::calculate_information_gain)
    /// without updating the covered state.
    pub fn estimate_information_gain(&self, new_info: &str) -> f64 {
        self.information.novelty(new_info)
    }

    /// Count one step and decide whether to stop.
    ///
    /// The step counter is incremented exactly once per call. Returns `true`
    /// when `steps_taken` reaches `max_steps`, otherwise when the information
    /// gain of `new_info` is below the threshold. Once stopped, the policy
    /// stays stopped.
    pub fn should_stop(&mut self, new_info: &str) -> bool {
        self.steps_taken += 1;

        if self.state.is_terminal() {
            return true;
        }

        if self.steps_taken >= self.config.max_steps {
            self.state = StoppingState::StepLimitReached;
            return true;
        }

        let gain = self.calculate_information_gain(new_info);
        if gain < self.config.threshold {
            self.state = StoppingState::Saturated;
            return true;
        }
        false
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn state(&self) -> StoppingState {
        self.state
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.state.stop_reason()
    }

    /// Gain computed by the most recent estimate, if any.
    pub fn last_gain(&self) -> Option<f64> {
        self.last_gain
    }

    pub fn config(&self) -> &StoppingConfig {
        &self.config
    }
}
