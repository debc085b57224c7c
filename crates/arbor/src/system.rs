//! Wiring of the core subsystems behind one handle.
//!
//! `ArborSystem` owns the store, shares it with the packager and the
//! adaptation engine, and exposes the narrow operations embedding
//! applications call. Consumers that only need parameters should hold an
//! inheritance package, not the system handle.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use arbor_evolution::{AdaptationEngine, CycleSummary, EvolutionConfig, EvolutionSummary};
use arbor_feedback::{FeedbackLoop, FeedbackResult, LoopConfig, LoopResult};
use arbor_lineage::{
    CustomFactors, InheritancePackage, InheritancePackager, InheritanceTree, LineageConfig,
    LineageRecord, Profile,
};
use arbor_morph::interpolate;
use arbor_store::{ParameterStore, StoreSnapshot};
use arbor_types::{CompositeShape, ParameterSet, UsageCounters};
use thiserror::Error;

// ── Errors ──────────────────────────────────────────────────────────

/// Errors surfaced by the system facade.
#[derive(Debug, Error)]
pub enum ArborError {
    #[error("store error: {0}")]
    Store(#[from] arbor_store::StoreError),

    #[error("lineage error: {0}")]
    Lineage(#[from] arbor_lineage::LineageError),

    #[error("morph error: {0}")]
    Morph(#[from] arbor_morph::MorphError),

    #[error("evolution error: {0}")]
    Evolution(#[from] arbor_evolution::EvolutionError),

    #[error("unknown shape: {0}")]
    UnknownShape(String),
}

/// Result type for facade operations.
pub type ArborResult<T> = Result<T, ArborError>;

// ── System ──────────────────────────────────────────────────────────

/// The assembled core: store, packager, and adaptation engine sharing
/// one canonical parameter set.
pub struct ArborSystem {
    store: Arc<ParameterStore>,
    packager: Arc<InheritancePackager>,
    engine: AdaptationEngine,
}

impl ArborSystem {
    /// Assemble a system with default configuration.
    pub fn new() -> Self {
        Self::with_config(EvolutionConfig::default(), LineageConfig::default())
    }

    /// Assemble a system with explicit engine and ledger configuration.
    pub fn with_config(evolution: EvolutionConfig, lineage: LineageConfig) -> Self {
        let store = Arc::new(ParameterStore::new());
        let packager = Arc::new(InheritancePackager::with_config(
            Arc::clone(&store),
            lineage,
        ));
        let engine =
            AdaptationEngine::with_config(Arc::clone(&store), Arc::clone(&packager), evolution);
        Self {
            store,
            packager,
            engine,
        }
    }

    /// Rebuild a system around a previously exported snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> ArborResult<Self> {
        let store = Arc::new(snapshot.restore()?);
        let packager = Arc::new(InheritancePackager::new(Arc::clone(&store)));
        let engine = AdaptationEngine::new(Arc::clone(&store), Arc::clone(&packager));
        Ok(Self {
            store,
            packager,
            engine,
        })
    }

    // ── Handles ─────────────────────────────────────────────────────

    pub fn store(&self) -> &Arc<ParameterStore> {
        &self.store
    }

    pub fn packager(&self) -> &Arc<InheritancePackager> {
        &self.packager
    }

    pub fn engine(&self) -> &AdaptationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AdaptationEngine {
        &mut self.engine
    }

    // ── Narrow API ──────────────────────────────────────────────────

    /// Read-only snapshot of the canonical coefficients.
    pub fn parameters(&self) -> ArborResult<ParameterSet> {
        Ok(self.store.get_parameters()?)
    }

    /// Register a composite shape in the catalog.
    pub fn register_shape(&self, name: &str, shape: CompositeShape) -> ArborResult<()> {
        Ok(self.store.register_shape(name, shape)?)
    }

    /// Issue an inheritance package for a named consumer.
    pub fn request_inheritance(
        &self,
        consumer_name: &str,
        profile: Profile,
        custom_factors: Option<&CustomFactors>,
    ) -> ArborResult<InheritancePackage> {
        Ok(self
            .packager
            .request_inheritance(consumer_name, profile, custom_factors)?)
    }

    /// Chronological lineage for one consumer.
    pub fn lineage(&self, consumer_name: &str) -> ArborResult<Vec<LineageRecord>> {
        Ok(self.packager.get_lineage(consumer_name)?)
    }

    /// Lineage introspection summary.
    pub fn inheritance_tree(&self) -> ArborResult<InheritanceTree> {
        Ok(self.packager.inheritance_tree()?)
    }

    /// Morph between two catalogued shapes.
    pub fn interpolate_catalogued(
        &self,
        source_name: &str,
        target_name: &str,
        steps: usize,
    ) -> ArborResult<Vec<CompositeShape>> {
        let source = self
            .store
            .shape(source_name)?
            .ok_or_else(|| ArborError::UnknownShape(source_name.to_string()))?;
        let target = self
            .store
            .shape(target_name)?
            .ok_or_else(|| ArborError::UnknownShape(target_name.to_string()))?;
        Ok(interpolate(&source, &target, steps)?)
    }

    /// Live usage counters for health analysis.
    pub fn usage_counters(&self) -> ArborResult<UsageCounters> {
        Ok(self.engine.usage_counters()?)
    }

    /// Run bounded evolution cycles.
    pub fn run_evolution(&mut self, max_cycles: usize, cancel: &AtomicBool) -> CycleSummary {
        self.engine.run_cycles(max_cycles, cancel)
    }

    /// Engine introspection summary.
    pub fn evolution_summary(&self) -> EvolutionSummary {
        self.engine.summary()
    }

    /// Run a bounded feedback refinement loop.
    pub fn run_feedback<A, P, E>(
        &self,
        config: LoopConfig,
        cancel: &AtomicBool,
        produce: P,
        evaluate: E,
    ) -> FeedbackResult<LoopResult<A>>
    where
        P: FnMut(&arbor_feedback::CycleContext) -> A,
        E: FnMut(&A) -> f64,
    {
        let feedback = FeedbackLoop::new(config)?;
        Ok(feedback.run(cancel, produce, evaluate))
    }

    /// Export the store for process-restart recovery.
    pub fn snapshot(&self) -> ArborResult<StoreSnapshot> {
        Ok(StoreSnapshot::capture(&self.store)?)
    }
}

impl Default for ArborSystem {
    fn default() -> Self {
        Self::new()
    }
}
