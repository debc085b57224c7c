//! Evolution metrics and the weighted health score.
//!
//! Scoring is a named, independently testable function over an explicit
//! weight configuration; nothing here reads ambient state.

use arbor_types::UsageCounters;
use serde::{Deserialize, Serialize};

// ── Metrics ─────────────────────────────────────────────────────────

/// Health metrics recomputed each evolution cycle; every field lies in
/// `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionMetrics {
    /// The weighted overall score.
    pub performance_score: f64,
    pub inheritance_success_rate: f64,
    pub adaptation_efficiency: f64,
    pub system_complexity: f64,
    pub revolutionary_potential: f64,
}

/// A metrics sample with its capture time, for trend analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricsSample {
    pub metrics: EvolutionMetrics,
    pub captured_at: chrono::DateTime<chrono::Utc>,
}

// ── Score Weights ───────────────────────────────────────────────────

/// Explicit weight configuration for the overall health score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub inheritance: f64,
    pub adaptation: f64,
    pub complexity: f64,
    pub potential: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            inheritance: 0.3,
            adaptation: 0.3,
            complexity: 0.2,
            potential: 0.2,
        }
    }
}

/// Weighted sum of the scoring inputs, clamped to `[0, 1]`.
pub fn score_weighted_sum(metrics: &EvolutionMetrics, weights: &ScoreWeights) -> f64 {
    let score = metrics.inheritance_success_rate * weights.inheritance
        + metrics.adaptation_efficiency * weights.adaptation
        + metrics.system_complexity * weights.complexity
        + metrics.revolutionary_potential * weights.potential;
    score.clamp(0.0, 1.0)
}

/// Saturation points: the counter values at which each ratio reaches 1.0.
const INHERITANCE_SATURATION: f64 = 10.0;
const ADAPTATION_SATURATION: f64 = 20.0;
const COMPLEXITY_SATURATION: f64 = 6.0;

/// Compute metrics from live usage counters plus the retained
/// revolutionary potential. Pure: same inputs, same output.
pub fn metrics_from_counters(
    counters: &UsageCounters,
    revolutionary_potential: f64,
    weights: &ScoreWeights,
) -> EvolutionMetrics {
    let mut metrics = EvolutionMetrics {
        performance_score: 0.0,
        inheritance_success_rate: (counters.inheritance_count as f64 / INHERITANCE_SATURATION)
            .min(1.0),
        adaptation_efficiency: (counters.adaptation_count as f64 / ADAPTATION_SATURATION).min(1.0),
        system_complexity: (counters.distinct_consumer_kinds as f64 / COMPLEXITY_SATURATION)
            .min(1.0),
        revolutionary_potential: revolutionary_potential.clamp(0.0, 1.0),
    };
    metrics.performance_score = score_weighted_sum(&metrics, weights);
    metrics
}
