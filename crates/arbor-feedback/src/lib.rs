//! Arbor feedback loop.
//!
//! Generic bounded iterative refinement: a caller-supplied `produce`
//! function creates an artifact from the loop context, a caller-supplied
//! `evaluate` function scores it in `[0, 1]`, and the loop adapts its
//! confidence and learning rate between iterations until a convergence
//! threshold, the iteration cap, or cancellation stops it.
//!
//! Evaluation problems never abort a run: non-finite quality scores are
//! treated as zero and the loop carries on.

#![deny(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};

use arbor_types::LoopId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

// ── Bounds ──────────────────────────────────────────────────────────

const LEARNING_RATE_MIN: f64 = 0.01;
const LEARNING_RATE_MAX: f64 = 0.2;
const CONFIDENCE_MIN: f64 = 0.1;
const CONFIDENCE_MAX: f64 = 0.99;

// ── Errors ──────────────────────────────────────────────────────────

/// Errors from feedback-loop configuration. The loop itself never fails.
#[derive(Debug, Error, PartialEq)]
pub enum FeedbackError {
    #[error("invalid argument: max_iterations must be at least 1")]
    ZeroIterations,

    #[error("invalid argument: convergence threshold must lie in [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("invalid argument: learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f64),
}

/// Result type for feedback-loop configuration.
pub type FeedbackResult<T> = Result<T, FeedbackError>;

// ── Configuration ───────────────────────────────────────────────────

/// Configuration for one feedback run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LoopConfig {
    pub max_iterations: usize,
    /// Quality at or above which the loop stops early.
    pub convergence_threshold: f64,
    /// Starting learning rate; adapted multiplicatively and clamped to
    /// `[0.01, 0.2]` during the run.
    pub learning_rate: f64,
    /// Starting confidence; clamped to `[0.1, 0.99]` during the run.
    pub initial_confidence: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            convergence_threshold: 0.95,
            learning_rate: 0.05,
            initial_confidence: 0.5,
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> FeedbackResult<()> {
        if self.max_iterations < 1 {
            return Err(FeedbackError::ZeroIterations);
        }
        if !self.convergence_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.convergence_threshold)
        {
            return Err(FeedbackError::ThresholdOutOfRange(self.convergence_threshold));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(FeedbackError::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }
}

// ── Records ─────────────────────────────────────────────────────────

/// Context visible to the producer each iteration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CycleContext {
    pub iteration: usize,
    pub confidence: f64,
    pub learning_rate: f64,
    pub best_quality: f64,
}

/// One iteration's record; confidence and learning rate are the values
/// after this iteration's adjustment.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FeedbackCycleRecord {
    pub iteration_index: usize,
    pub quality_score: f64,
    pub confidence: f64,
    pub learning_rate: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Outcome of a feedback run.
#[derive(Clone, Debug)]
pub struct LoopResult<A> {
    pub loop_id: LoopId,
    pub best_quality: f64,
    pub best_artifact: Option<A>,
    pub iterations_run: usize,
    pub converged: bool,
    pub cancelled: bool,
    pub final_confidence: f64,
    pub final_learning_rate: f64,
    pub history: Vec<FeedbackCycleRecord>,
}

impl<A> LoopResult<A> {
    /// Condensed performance digest of the run.
    pub fn summary(&self) -> LoopSummary {
        let total: f64 = self.history.iter().map(|r| r.quality_score).sum();
        let first = self.history.first().map_or(0.0, |r| r.quality_score);
        LoopSummary {
            iterations_run: self.iterations_run,
            best_quality: self.best_quality,
            average_quality: if self.history.is_empty() {
                0.0
            } else {
                total / self.history.len() as f64
            },
            total_improvement: self.best_quality - first,
            converged: self.converged,
            final_learning_rate: self.final_learning_rate,
        }
    }
}

/// Digest of a completed run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LoopSummary {
    pub iterations_run: usize,
    pub best_quality: f64,
    pub average_quality: f64,
    pub total_improvement: f64,
    pub converged: bool,
    pub final_learning_rate: f64,
}

// ── Loop ────────────────────────────────────────────────────────────

/// Bounded produce → evaluate refinement loop.
#[derive(Debug)]
pub struct FeedbackLoop {
    config: LoopConfig,
}

impl FeedbackLoop {
    pub fn new(config: LoopConfig) -> FeedbackResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Run the loop. Checks `cancel` once per iteration.
    ///
    /// Guarantees: `history.len() == iterations_run <= max_iterations`,
    /// `best_quality` equals the maximum recorded quality, and on
    /// convergence `iterations_run` is the index of the first threshold
    /// hit plus one.
    pub fn run<A, P, E>(&self, cancel: &AtomicBool, mut produce: P, mut evaluate: E) -> LoopResult<A>
    where
        P: FnMut(&CycleContext) -> A,
        E: FnMut(&A) -> f64,
    {
        let loop_id = LoopId::new();
        let mut confidence = self
            .config
            .initial_confidence
            .clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);
        let mut learning_rate = self
            .config
            .learning_rate
            .clamp(LEARNING_RATE_MIN, LEARNING_RATE_MAX);

        let mut best_quality = 0.0;
        let mut best_artifact: Option<A> = None;
        let mut previous_quality = 0.0;
        let mut history = Vec::new();
        let mut converged = false;
        let mut cancelled = false;

        for iteration in 0..self.config.max_iterations {
            if cancel.load(Ordering::Relaxed) {
                info!(%loop_id, iteration, "feedback loop cancelled");
                cancelled = true;
                break;
            }

            let context = CycleContext {
                iteration,
                confidence,
                learning_rate,
                best_quality,
            };
            let artifact = produce(&context);
            let mut quality = evaluate(&artifact);
            if !quality.is_finite() {
                warn!(%loop_id, iteration, "non-finite quality score treated as 0");
                quality = 0.0;
            }
            let quality = quality.clamp(0.0, 1.0);

            if best_artifact.is_none() || quality > best_quality {
                best_quality = quality;
                best_artifact = Some(artifact);
            }

            let adjustment = quality - previous_quality;
            if adjustment > 0.0 {
                learning_rate = (learning_rate * 1.1).min(LEARNING_RATE_MAX);
            } else if adjustment < 0.0 {
                learning_rate = (learning_rate * 0.9).max(LEARNING_RATE_MIN);
            }
            confidence = (confidence + adjustment).clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);
            previous_quality = quality;

            history.push(FeedbackCycleRecord {
                iteration_index: iteration,
                quality_score: quality,
                confidence,
                learning_rate,
                timestamp: Utc::now(),
            });
            debug!(%loop_id, iteration, quality, confidence, learning_rate, "iteration recorded");

            if quality >= self.config.convergence_threshold {
                info!(%loop_id, iteration, quality, "converged");
                converged = true;
                break;
            }
        }

        LoopResult {
            loop_id,
            best_quality,
            best_artifact,
            iterations_run: history.len(),
            converged,
            cancelled,
            final_confidence: confidence,
            final_learning_rate: learning_rate,
            history,
        }
    }
}
