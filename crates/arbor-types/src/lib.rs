//! Arbor core data model.
//!
//! Defines the canonical parameter set ("mother" coefficients), composite
//! shapes built from the three primitive transform kinds, identifiers, and
//! the usage counters that feed health scoring.
//!
//! # Invariants
//!
//! - Every numeric field of a [`ParameterSet`] is finite; `validate()`
//!   rejects NaN and infinity before any set is committed.
//! - `quantum_factors` is a non-empty, strictly increasing sequence of
//!   positive integers.
//! - A [`CompositeShape`] is an *ordered* sequence of components; order is
//!   significant because interpolation pairs components by index.

#![deny(unsafe_code)]

pub mod counters;
pub mod error;
pub mod ids;
pub mod params;
pub mod shape;

// ── Re-exports ──────────────────────────────────────────────────────

pub use counters::UsageCounters;
pub use error::{ComponentError, ParameterError};
pub use ids::{CycleId, LoopId, PackageId};
pub use params::{
    ControlParams, LinearParams, ParameterSet, QuantizedSigmoidParams, SigmoidParams,
};
pub use shape::{Component, ComponentKind, ComponentParams, CompositeShape};
