//! Arbor — hierarchical parameter inheritance and iterative self-tuning.
//!
//! The core is built from two primitive transforms (a generalized
//! sigmoid and an affine function) plus a quantization operator, and the
//! machinery that governs them:
//!
//! 1. **Transforms** — pure numeric kernel ([`arbor_transforms`])
//! 2. **Store** — canonical coefficients and the shape catalog behind a
//!    validated, all-or-nothing mutation path ([`arbor_store`])
//! 3. **Lineage** — scoped, scaled parameter packages per consumer, with
//!    an append-only audit ledger ([`arbor_lineage`])
//! 4. **Morph** — deterministic composite-shape interpolation
//!    ([`arbor_morph`])
//! 5. **Evolution** — the closed health → decision → safety → mutation
//!    loop ([`arbor_evolution`])
//! 6. **Feedback** — bounded produce/evaluate refinement
//!    ([`arbor_feedback`])
//!
//! # Invariants
//!
//! - A mutation commits a fully valid parameter set or changes nothing.
//! - Issued packages are immutable snapshots; identical store state and
//!   profile derive identical parameters.
//! - Interpolation frame 0 equals the source and frame `steps` the
//!   target, field for field.
//! - The long-running loops are bounded and cancellable; cycle-level
//!   failures are captured, never thrown.

#![deny(unsafe_code)]

pub mod system;

// ── Re-exports: the narrow external API ─────────────────────────────

pub use arbor_evolution::{
    decide, metrics_from_counters, safety_check, score_weighted_sum, AdaptationEngine,
    CycleRecord, CycleSummary, Decision, EvolutionConfig, EvolutionDirection, EvolutionMetrics,
    EvolutionResult, EvolutionSummary, HealthState, SafetyReport, ScoreWeights,
};
pub use arbor_feedback::{
    CycleContext, FeedbackCycleRecord, FeedbackError, FeedbackLoop, LoopConfig, LoopResult,
    LoopSummary,
};
pub use arbor_lineage::{
    CustomFactors, InheritancePackage, InheritancePackager, InheritanceTree, LineageConfig,
    LineageRecord, Profile,
};
pub use arbor_morph::{interpolate, morph_frame, MorphError};
pub use arbor_store::{IntegrityReport, ParameterStore, StoreError, StoreSnapshot};
pub use arbor_transforms::{
    blended_transform, evaluate_component, evaluate_composite, linear, quantized_sigmoid, sigmoid,
    TransformError,
};
pub use arbor_types::{
    Component, ComponentError, ComponentKind, ComponentParams, CompositeShape, ControlParams,
    CycleId, LinearParams, LoopId, PackageId, ParameterError, ParameterSet,
    QuantizedSigmoidParams, SigmoidParams, UsageCounters,
};
pub use system::{ArborError, ArborResult, ArborSystem};
