//! The adaptation engine — the closed self-tuning loop.
//!
//! Each cycle: analyze health from live counters, decide a direction,
//! run safety checks, then apply one bounded, validated mutation to the
//! parameter store. Cycle-level failures are captured into the result
//! records; they never abort the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arbor_lineage::InheritancePackager;
use arbor_store::ParameterStore;
use arbor_types::{
    Component, CompositeShape, CycleId, LinearParams, ParameterSet, QuantizedSigmoidParams,
    SigmoidParams, UsageCounters,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::direction::{decide, Decision, EvolutionDirection};
use crate::error::{EngineResult, EvolutionError};
use crate::health::HealthState;
use crate::metrics::{metrics_from_counters, EvolutionMetrics, MetricsSample, ScoreWeights};
use crate::safety::{safety_check, SafetyReport};

// ── Configuration ───────────────────────────────────────────────────

/// Configuration for the adaptation engine.
#[derive(Clone, Debug)]
pub struct EvolutionConfig {
    /// Health-score weights.
    pub weights: ScoreWeights,
    /// Ceiling for appended quantum factors. The growth rule always
    /// doubles the largest factor; this cap bounds the ladder.
    pub quantum_factor_cap: u32,
    /// Maximum ladder length.
    pub max_quantum_factors: usize,
    /// `run_cycles` stops once the performance score reaches this.
    pub performance_target: f64,
    /// Whether safety checks gate execution.
    pub safety_checks_enabled: bool,
    /// Maximum retained evolution results.
    pub max_tracked_results: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            quantum_factor_cap: 4096,
            max_quantum_factors: 15,
            performance_target: 0.99,
            safety_checks_enabled: true,
            max_tracked_results: 256,
        }
    }
}

// ── Results ─────────────────────────────────────────────────────────

/// Result of one evolution execution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvolutionResult {
    pub id: CycleId,
    pub direction: EvolutionDirection,
    pub changes: Vec<String>,
    pub new_capabilities: Vec<String>,
    pub performance_delta: f64,
    pub success: bool,
    pub error: Option<String>,
    /// Pre-mutation snapshot, retained so a rollback stays possible.
    /// `None` only when the store could not be read at all.
    pub prior_parameters: Option<ParameterSet>,
    pub executed_at: chrono::DateTime<chrono::Utc>,
}

impl std::fmt::Display for EvolutionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.success { "ok" } else { "failed" };
        write!(
            f,
            "Evolution({}, {}, changes={}, {})",
            self.id,
            self.direction,
            self.changes.len(),
            status,
        )
    }
}

/// Record of one cycle within `run_cycles`, executed or skipped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CycleRecord {
    pub index: usize,
    pub health: HealthState,
    pub metrics: EvolutionMetrics,
    pub evolved: bool,
    pub skip_reason: Option<String>,
    pub result: Option<EvolutionResult>,
}

/// Summary of a `run_cycles` invocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CycleSummary {
    pub cycles_run: usize,
    pub successful_evolutions: usize,
    pub failed_evolutions: usize,
    pub skipped_cycles: usize,
    pub breakthroughs: usize,
    pub cancelled: bool,
    pub final_metrics: EvolutionMetrics,
    pub records: Vec<CycleRecord>,
}

impl std::fmt::Display for CycleSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cycles(run={}, ok={}, failed={}, skipped={}, breakthroughs={})",
            self.cycles_run,
            self.successful_evolutions,
            self.failed_evolutions,
            self.skipped_cycles,
            self.breakthroughs,
        )
    }
}

/// Long-run introspection summary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvolutionSummary {
    pub total_executions: usize,
    pub successful_executions: usize,
    pub revolutionary_mode: bool,
    /// The most recent metrics samples (up to 10).
    pub metrics_trend: Vec<MetricsSample>,
}

struct StepOutcome {
    changes: Vec<String>,
    new_capabilities: Vec<String>,
    performance_delta: f64,
}

// ── Engine ──────────────────────────────────────────────────────────

/// The self-evolution engine over one store/packager pair.
pub struct AdaptationEngine {
    store: Arc<ParameterStore>,
    packager: Arc<InheritancePackager>,
    config: EvolutionConfig,
    revolutionary_mode: bool,
    potential: f64,
    metrics_history: Vec<MetricsSample>,
    evolution_log: Vec<EvolutionResult>,
}

impl AdaptationEngine {
    pub fn new(store: Arc<ParameterStore>, packager: Arc<InheritancePackager>) -> Self {
        Self::with_config(store, packager, EvolutionConfig::default())
    }

    pub fn with_config(
        store: Arc<ParameterStore>,
        packager: Arc<InheritancePackager>,
        config: EvolutionConfig,
    ) -> Self {
        Self {
            store,
            packager,
            config,
            revolutionary_mode: false,
            potential: 0.0,
            metrics_history: Vec::new(),
            evolution_log: Vec::new(),
        }
    }

    /// Assemble live usage counters from the store and packager.
    pub fn usage_counters(&self) -> EngineResult<UsageCounters> {
        Ok(UsageCounters::new(
            self.packager.inheritance_count(),
            self.store.mutation_count(),
            self.packager.distinct_consumer_count()? as u64,
        ))
    }

    /// Compute metrics and health band from explicit counters, retaining
    /// the sample for trend analysis.
    pub fn analyze_health(&mut self, counters: &UsageCounters) -> (EvolutionMetrics, HealthState) {
        let metrics = metrics_from_counters(counters, self.potential, &self.config.weights);
        let health = HealthState::from_score(metrics.performance_score);
        self.metrics_history.push(MetricsSample {
            metrics,
            captured_at: Utc::now(),
        });
        debug!(score = metrics.performance_score, %health, "health analyzed");
        (metrics, health)
    }

    /// The fixed health-to-direction decision.
    pub fn decide(&self, health: HealthState) -> Decision {
        decide(health)
    }

    /// Safety checks for a proposed direction.
    pub fn safety_check(
        &self,
        direction: EvolutionDirection,
        counters: &UsageCounters,
        performance_score: f64,
    ) -> SafetyReport {
        safety_check(direction, counters, performance_score)
    }

    /// Whether a breakthrough has switched the engine into
    /// revolutionary mode.
    pub fn revolutionary_mode(&self) -> bool {
        self.revolutionary_mode
    }

    /// Apply one bounded mutation for the given direction.
    ///
    /// Never returns an error: failures (including rejected store
    /// mutations) come back as `success == false` with empty changes.
    pub fn execute(&mut self, direction: EvolutionDirection) -> EvolutionResult {
        let id = CycleId::new();
        let executed_at = Utc::now();

        let prior = match self.store.get_parameters() {
            Ok(parameters) => parameters,
            Err(e) => {
                warn!(error = %e, "store unreadable; evolution aborted");
                return EvolutionResult {
                    id,
                    direction,
                    changes: Vec::new(),
                    new_capabilities: Vec::new(),
                    performance_delta: 0.0,
                    success: false,
                    error: Some(e.to_string()),
                    prior_parameters: None,
                    executed_at,
                };
            }
        };

        let outcome = match direction {
            EvolutionDirection::OptimizePerformance => self.optimize_performance(&prior),
            EvolutionDirection::ImproveAccuracy => self.improve_accuracy(),
            EvolutionDirection::ExpandCapabilities => self.expand_capabilities(),
            EvolutionDirection::EnhanceAdaptation => self.enhance_adaptation(),
            EvolutionDirection::RevolutionaryBreakthrough => self.revolutionary_breakthrough(),
        };

        let result = match outcome {
            Ok(step) => {
                if direction == EvolutionDirection::RevolutionaryBreakthrough {
                    self.revolutionary_mode = true;
                    self.potential = 1.0;
                } else {
                    self.potential = (self.potential + step.performance_delta * 0.5).min(1.0);
                }
                info!(%direction, changes = step.changes.len(), "evolution step applied");
                EvolutionResult {
                    id,
                    direction,
                    changes: step.changes,
                    new_capabilities: step.new_capabilities,
                    performance_delta: step.performance_delta,
                    success: true,
                    error: None,
                    prior_parameters: Some(prior),
                    executed_at,
                }
            }
            Err(e) => {
                warn!(%direction, error = %e, "evolution step failed");
                EvolutionResult {
                    id,
                    direction,
                    changes: Vec::new(),
                    new_capabilities: Vec::new(),
                    performance_delta: 0.0,
                    success: false,
                    error: Some(e.to_string()),
                    prior_parameters: Some(prior),
                    executed_at,
                }
            }
        };

        self.evolution_log.push(result.clone());
        while self.evolution_log.len() > self.config.max_tracked_results {
            self.evolution_log.remove(0);
        }
        result
    }

    /// Run up to `max_cycles` analyze → decide → check → execute cycles.
    ///
    /// Stops early on cancellation or once the performance target is
    /// reached. Skipped cycles (critical health, failed safety checks)
    /// are still recorded.
    pub fn run_cycles(&mut self, max_cycles: usize, cancel: &AtomicBool) -> CycleSummary {
        let mut summary = CycleSummary {
            cycles_run: 0,
            successful_evolutions: 0,
            failed_evolutions: 0,
            skipped_cycles: 0,
            breakthroughs: 0,
            cancelled: false,
            final_metrics: EvolutionMetrics::default(),
            records: Vec::new(),
        };

        for index in 0..max_cycles {
            if cancel.load(Ordering::Relaxed) {
                info!(cycle = index, "evolution cancelled");
                summary.cancelled = true;
                break;
            }
            summary.cycles_run += 1;

            let counters = match self.usage_counters() {
                Ok(counters) => counters,
                Err(e) => {
                    summary.skipped_cycles += 1;
                    summary.records.push(CycleRecord {
                        index,
                        health: HealthState::Critical,
                        metrics: EvolutionMetrics::default(),
                        evolved: false,
                        skip_reason: Some(format!("counters unavailable: {e}")),
                        result: None,
                    });
                    continue;
                }
            };
            let (metrics, health) = self.analyze_health(&counters);
            summary.final_metrics = metrics;

            let decision = self.decide(health);
            let direction = match decision.direction {
                Some(direction) if decision.should_evolve => direction,
                _ => {
                    debug!(cycle = index, %health, "cycle skipped by decision");
                    summary.skipped_cycles += 1;
                    summary.records.push(CycleRecord {
                        index,
                        health,
                        metrics,
                        evolved: false,
                        skip_reason: decision.reasons.first().cloned(),
                        result: None,
                    });
                    continue;
                }
            };

            if self.config.safety_checks_enabled {
                let report = self.safety_check(direction, &counters, metrics.performance_score);
                if !report.passed {
                    warn!(cycle = index, %direction, "safety check blocked evolution");
                    summary.skipped_cycles += 1;
                    summary.records.push(CycleRecord {
                        index,
                        health,
                        metrics,
                        evolved: false,
                        skip_reason: Some(format!(
                            "safety check failed: {}",
                            report.critical_issues.join("; ")
                        )),
                        result: None,
                    });
                    continue;
                }
            }

            let result = self.execute(direction);
            if result.success {
                summary.successful_evolutions += 1;
                if direction == EvolutionDirection::RevolutionaryBreakthrough {
                    summary.breakthroughs += 1;
                }
            } else {
                summary.failed_evolutions += 1;
            }
            summary.records.push(CycleRecord {
                index,
                health,
                metrics,
                evolved: true,
                skip_reason: None,
                result: Some(result),
            });

            // Re-score after the mutation so the stop condition sees the
            // cycle's effect.
            if let Ok(counters) = self.usage_counters() {
                let post = metrics_from_counters(&counters, self.potential, &self.config.weights);
                summary.final_metrics = post;
                if post.performance_score >= self.config.performance_target {
                    info!(
                        cycle = index,
                        score = post.performance_score,
                        "performance target reached"
                    );
                    break;
                }
            }
        }

        summary
    }

    /// Long-run summary with the recent metrics trend.
    pub fn summary(&self) -> EvolutionSummary {
        let trend_start = self.metrics_history.len().saturating_sub(10);
        EvolutionSummary {
            total_executions: self.evolution_log.len(),
            successful_executions: self.evolution_log.iter().filter(|r| r.success).count(),
            revolutionary_mode: self.revolutionary_mode,
            metrics_trend: self.metrics_history[trend_start..].to_vec(),
        }
    }

    /// Retained evolution results, oldest first.
    pub fn evolution_log(&self) -> &[EvolutionResult] {
        &self.evolution_log
    }

    #[cfg(test)]
    pub(crate) fn seed_potential(&mut self, potential: f64) {
        self.potential = potential;
    }

    // ── Direction implementations ───────────────────────────────────

    fn optimize_performance(&self, prior: &ParameterSet) -> Result<StepOutcome, EvolutionError> {
        let cap = self.config.quantum_factor_cap;
        let max_len = self.config.max_quantum_factors;
        let committed = self.store.mutate(|set| {
            let mut next = set.clone();
            for group in next.sigmoid_groups_mut() {
                group.k *= 1.05;
            }
            if next.quantum_factors.len() < max_len {
                let doubled = next.max_quantum_factor().saturating_mul(2);
                if doubled <= cap {
                    next.quantum_factors.push(doubled);
                }
            }
            next
        })?;

        let mut changes = vec!["sigmoid steepness scaled by 1.05 in all groups".to_string()];
        if committed.quantum_factors.len() > prior.quantum_factors.len() {
            changes.push(format!(
                "quantum factor {} appended",
                committed.max_quantum_factor()
            ));
        }
        Ok(StepOutcome {
            changes,
            new_capabilities: Vec::new(),
            performance_delta: 0.1,
        })
    }

    fn improve_accuracy(&self) -> Result<StepOutcome, EvolutionError> {
        self.store.mutate(|set| {
            let mut next = set.clone();
            for group in next.linear_groups_mut() {
                group.beta *= 1.02;
            }
            next
        })?;
        Ok(StepOutcome {
            changes: vec!["linear slope recalibrated by 1.02 in all groups".to_string()],
            new_capabilities: Vec::new(),
            performance_delta: 0.08,
        })
    }

    fn expand_capabilities(&self) -> Result<StepOutcome, EvolutionError> {
        let mut changes = Vec::new();
        let mut new_capabilities = Vec::new();
        for (name, shape) in expansion_shapes() {
            if !self.store.has_shape(name)? {
                self.store.register_shape(name, shape)?;
                changes.push(format!("shape {name} registered"));
                new_capabilities.push(name.to_string());
            }
        }
        if changes.is_empty() {
            changes.push("expansion shapes already catalogued".to_string());
        }
        Ok(StepOutcome {
            changes,
            new_capabilities,
            performance_delta: 0.15,
        })
    }

    fn enhance_adaptation(&self) -> Result<StepOutcome, EvolutionError> {
        let committed = self.store.mutate(|set| {
            let mut next = set.clone();
            next.control.adaptation_flexibility =
                (next.control.adaptation_flexibility * 1.05).min(1.0);
            next
        })?;
        Ok(StepOutcome {
            changes: vec![format!(
                "adaptation flexibility raised to {:.4}",
                committed.control.adaptation_flexibility
            )],
            new_capabilities: Vec::new(),
            performance_delta: 0.12,
        })
    }

    fn revolutionary_breakthrough(&self) -> Result<StepOutcome, EvolutionError> {
        let mut changes = vec!["revolutionary mode enabled".to_string()];
        let mut new_capabilities = vec!["revolutionary-mode".to_string()];

        let name = "prototype_resonant_core";
        if !self.store.has_shape(name)? {
            self.store.register_shape(name, prototype_shape())?;
            changes.push(format!("shape {name} registered"));
            new_capabilities.push(name.to_string());
        }

        Ok(StepOutcome {
            changes,
            new_capabilities,
            performance_delta: 0.5,
        })
    }
}

/// Shapes added by a capability expansion.
fn expansion_shapes() -> Vec<(&'static str, CompositeShape)> {
    vec![
        (
            "advanced_spiral",
            CompositeShape::new(vec![
                Component::sigmoid(SigmoidParams::new(3, 2.5, 0.0, 1.2), 1.0),
                Component::linear(LinearParams::new(0.3, 0.1), 1.0),
            ]),
        ),
        (
            "quantum_wave",
            CompositeShape::new(vec![Component::quantized(
                QuantizedSigmoidParams::new(SigmoidParams::new(1, 4.0, 0.0, 1.0), 16),
                1.0,
            )]),
        ),
    ]
}

/// The prototype shape registered by a breakthrough.
fn prototype_shape() -> CompositeShape {
    CompositeShape::new(vec![
        Component::sigmoid(SigmoidParams::new(7, 1.618, 0.0, 2.718), 1.0),
        Component::quantized(
            QuantizedSigmoidParams::new(SigmoidParams::new(1, 1.0, 0.0, 1.0), 128),
            0.8,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_lineage::Profile;

    fn engine() -> AdaptationEngine {
        let store = Arc::new(ParameterStore::new());
        let packager = Arc::new(InheritancePackager::new(Arc::clone(&store)));
        AdaptationEngine::new(store, packager)
    }

    /// Issue enough usage to saturate every counter ratio.
    fn saturate(engine: &AdaptationEngine) {
        for i in 0..10 {
            let consumer = format!("consumer-{}", i % 6);
            engine
                .packager
                .request_inheritance(&consumer, Profile::Balanced, None)
                .unwrap();
        }
        for _ in 0..20 {
            engine
                .store
                .mutate(|set| {
                    let mut next = set.clone();
                    next.control.evolution_rate *= 1.0001;
                    next
                })
                .unwrap();
        }
    }

    #[test]
    fn fresh_engine_is_critical() {
        let mut engine = engine();
        let counters = engine.usage_counters().unwrap();
        let (metrics, health) = engine.analyze_health(&counters);
        assert_eq!(metrics.performance_score, 0.0);
        assert_eq!(health, HealthState::Critical);
    }

    #[test]
    fn saturated_engine_reaches_breakthrough_band() {
        let mut engine = engine();
        saturate(&engine);
        engine.seed_potential(1.0);
        let counters = engine.usage_counters().unwrap();
        let (metrics, health) = engine.analyze_health(&counters);
        assert!(metrics.performance_score >= 0.9);
        assert_eq!(health, HealthState::ReadyForBreakthrough);
    }

    #[test]
    fn optimize_scales_k_and_appends_quantum_factor() {
        let mut engine = engine();
        let before = engine.store.get_parameters().unwrap();
        let result = engine.execute(EvolutionDirection::OptimizePerformance);
        assert!(result.success, "{:?}", result.error);

        let after = engine.store.get_parameters().unwrap();
        assert!((after.sigmoid_base.k - before.sigmoid_base.k * 1.05).abs() < 1e-12);
        assert_eq!(after.max_quantum_factor(), 2048);
        assert_eq!(result.prior_parameters.as_ref().unwrap(), &before);
        assert_eq!(result.changes.len(), 2);
    }

    #[test]
    fn quantum_factor_growth_respects_cap() {
        let store = Arc::new(ParameterStore::new());
        let packager = Arc::new(InheritancePackager::new(Arc::clone(&store)));
        let config = EvolutionConfig {
            quantum_factor_cap: 2048,
            ..EvolutionConfig::default()
        };
        let mut engine = AdaptationEngine::with_config(store, packager, config);

        // First optimization appends 2048, second finds 4096 over the cap.
        engine.execute(EvolutionDirection::OptimizePerformance);
        let result = engine.execute(EvolutionDirection::OptimizePerformance);
        assert!(result.success);
        assert_eq!(result.changes.len(), 1); // no append recorded
        assert_eq!(
            engine.store.get_parameters().unwrap().max_quantum_factor(),
            2048
        );
    }

    #[test]
    fn improve_accuracy_recalibrates_linear_groups() {
        let mut engine = engine();
        let result = engine.execute(EvolutionDirection::ImproveAccuracy);
        assert!(result.success);
        let after = engine.store.get_parameters().unwrap();
        assert!((after.linear_base.beta - 1.02).abs() < 1e-12);
        assert!((after.linear_shape.beta - 1.618 * 1.02).abs() < 1e-12);
    }

    #[test]
    fn expand_registers_shapes_once() {
        let mut engine = engine();
        let first = engine.execute(EvolutionDirection::ExpandCapabilities);
        assert!(first.success);
        assert_eq!(
            first.new_capabilities,
            vec!["advanced_spiral".to_string(), "quantum_wave".to_string()]
        );
        assert!(engine.store.has_shape("advanced_spiral").unwrap());

        // Idempotent on a second pass.
        let second = engine.execute(EvolutionDirection::ExpandCapabilities);
        assert!(second.success);
        assert!(second.new_capabilities.is_empty());
    }

    #[test]
    fn enhance_adaptation_clamps_flexibility() {
        let mut engine = engine();
        for _ in 0..40 {
            let result = engine.execute(EvolutionDirection::EnhanceAdaptation);
            assert!(result.success);
        }
        let flexibility = engine
            .store
            .get_parameters()
            .unwrap()
            .control
            .adaptation_flexibility;
        assert!(flexibility <= 1.0);
    }

    #[test]
    fn breakthrough_enables_revolutionary_mode() {
        let mut engine = engine();
        let result = engine.execute(EvolutionDirection::RevolutionaryBreakthrough);
        assert!(result.success);
        assert!(engine.revolutionary_mode());
        assert!(engine.store.has_shape("prototype_resonant_core").unwrap());
        assert!(result
            .new_capabilities
            .contains(&"revolutionary-mode".to_string()));
    }

    #[test]
    fn failed_mutation_is_captured_not_raised() {
        let mut set = ParameterSet::default();
        set.sigmoid_base.k = f64::MAX; // next 1.05 scaling overflows to inf
        let store = Arc::new(ParameterStore::with_parameters(set).unwrap());
        let packager = Arc::new(InheritancePackager::new(Arc::clone(&store)));
        let mut engine = AdaptationEngine::new(store, packager);

        let result = engine.execute(EvolutionDirection::OptimizePerformance);
        assert!(!result.success);
        assert!(result.changes.is_empty());
        assert!(result.error.is_some());
        // The store is untouched by the rejected mutation.
        assert_eq!(
            engine.store.get_parameters().unwrap().sigmoid_base.k,
            f64::MAX
        );
    }

    #[test]
    fn run_cycles_skips_critical_system() {
        let mut engine = engine();
        let cancel = AtomicBool::new(false);
        let summary = engine.run_cycles(3, &cancel);
        assert_eq!(summary.cycles_run, 3);
        assert_eq!(summary.skipped_cycles, 3);
        assert_eq!(summary.successful_evolutions, 0);
        assert!(summary.records.iter().all(|r| !r.evolved));
    }

    #[test]
    fn run_cycles_evolves_active_system() {
        let mut engine = engine();
        saturate(&engine);
        let cancel = AtomicBool::new(false);
        let summary = engine.run_cycles(5, &cancel);
        assert!(summary.successful_evolutions >= 1);
        assert!(!summary.cancelled);
        assert_eq!(
            summary.cycles_run,
            summary.records.len(),
            "every cycle leaves a record"
        );
    }

    #[test]
    fn run_cycles_honors_cancellation() {
        let mut engine = engine();
        let cancel = AtomicBool::new(true);
        let summary = engine.run_cycles(10, &cancel);
        assert!(summary.cancelled);
        assert_eq!(summary.cycles_run, 0);
    }

    #[test]
    fn safety_failure_skips_but_logs() {
        let mut engine = engine();
        // Adaptations without any inheritance: health clears the bar but
        // the stability check must block execution.
        for _ in 0..20 {
            engine
                .store
                .mutate(|set| {
                    let mut next = set.clone();
                    next.control.evolution_rate *= 1.0001;
                    next
                })
                .unwrap();
        }
        engine.seed_potential(1.0);

        let cancel = AtomicBool::new(false);
        let summary = engine.run_cycles(2, &cancel);
        assert_eq!(summary.successful_evolutions, 0);
        assert_eq!(summary.skipped_cycles, 2);
        assert!(summary.records[0]
            .skip_reason
            .as_ref()
            .unwrap()
            .contains("safety"));
    }

    #[test]
    fn run_cycles_stops_at_performance_target() {
        let mut engine = engine();
        saturate(&engine);
        engine.seed_potential(1.0);
        let cancel = AtomicBool::new(false);
        let summary = engine.run_cycles(50, &cancel);
        // Saturated counters + breakthrough potential hit the target well
        // before 50 cycles.
        assert!(summary.cycles_run < 50);
        assert!(summary.final_metrics.performance_score >= 0.99);
    }

    #[test]
    fn summary_tracks_trend_and_log() {
        let mut engine = engine();
        saturate(&engine);
        let cancel = AtomicBool::new(false);
        engine.run_cycles(4, &cancel);
        let summary = engine.summary();
        assert!(summary.total_executions >= 1);
        assert!(summary.metrics_trend.len() <= 10);
        assert!(!engine.evolution_log().is_empty());
    }
}
