//! Error types for the evolution engine.
//!
//! Note that `execute` and `run_cycles` never surface these: cycle-level
//! failures are captured into the result objects so a long-running loop
//! survives isolated bad steps. The error type exists for the setup and
//! introspection paths.

use arbor_lineage::LineageError;
use arbor_store::StoreError;
use thiserror::Error;

/// Errors from evolution-engine setup and introspection.
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// The underlying parameter store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The inheritance packager failed.
    #[error("lineage error: {0}")]
    Lineage(#[from] LineageError),
}

/// Result type for evolution-engine operations.
pub type EngineResult<T> = Result<T, EvolutionError>;
