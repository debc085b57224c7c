//! Arbor self-evolution engine.
//!
//! A closed adaptation loop over the parameter store: score system health
//! from live usage counters, map the score to a discrete health state,
//! decide an evolution direction, gate it behind safety checks, and apply
//! one bounded, validated mutation. The loop is designed to run
//! indefinitely or for a bounded number of cycles; there is no terminal
//! state.
//!
//! # Failure containment
//!
//! `execute` and `run_cycles` never raise cycle-level failures. A rejected
//! mutation is recorded as an unsuccessful [`EvolutionResult`] and the
//! loop continues; each result retains the pre-mutation parameter
//! snapshot so rollback stays possible.

#![deny(unsafe_code)]

pub mod direction;
pub mod engine;
pub mod error;
pub mod health;
pub mod metrics;
pub mod safety;

// ── Re-exports ──────────────────────────────────────────────────────

pub use direction::{decide, Decision, EvolutionDirection};
pub use engine::{
    AdaptationEngine, CycleRecord, CycleSummary, EvolutionConfig, EvolutionResult,
    EvolutionSummary,
};
pub use error::{EngineResult, EvolutionError};
pub use health::HealthState;
pub use metrics::{
    metrics_from_counters, score_weighted_sum, EvolutionMetrics, MetricsSample, ScoreWeights,
};
pub use safety::{safety_check, SafetyReport};

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_lineage::{InheritancePackager, Profile};
    use arbor_store::ParameterStore;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    // ── E2E: decision pipeline against live usage ───────────────────

    #[test]
    fn e2e_usage_drives_health_transitions() {
        let store = Arc::new(ParameterStore::new());
        let packager = Arc::new(InheritancePackager::new(Arc::clone(&store)));
        let mut engine = AdaptationEngine::new(Arc::clone(&store), Arc::clone(&packager));

        let counters = engine.usage_counters().unwrap();
        let (_, health) = engine.analyze_health(&counters);
        assert_eq!(health, HealthState::Critical);

        // Light usage lifts the system out of the critical band.
        for i in 0..10 {
            packager
                .request_inheritance(&format!("unit-{i}"), Profile::Balanced, None)
                .unwrap();
        }
        for _ in 0..10 {
            store
                .mutate(|set| {
                    let mut next = set.clone();
                    next.control.evolution_rate *= 1.001;
                    next
                })
                .unwrap();
        }

        let counters = engine.usage_counters().unwrap();
        let (metrics, health) = engine.analyze_health(&counters);
        assert!(metrics.performance_score >= 0.4);
        assert_ne!(health, HealthState::Critical);

        let cancel = AtomicBool::new(false);
        let summary = engine.run_cycles(3, &cancel);
        assert!(summary.successful_evolutions >= 1);
    }

    // ── Health mapping on synthetic scores ──────────────────────────

    #[test]
    fn synthetic_score_mapping_matches_bands() {
        assert_eq!(
            HealthState::from_score(0.95),
            HealthState::ReadyForBreakthrough
        );
        assert_eq!(HealthState::from_score(0.3), HealthState::Critical);
    }
}
