//! Error types for inheritance packaging.

use arbor_store::StoreError;
use thiserror::Error;

/// Errors from inheritance and lineage operations.
#[derive(Debug, Error)]
pub enum LineageError {
    /// A scaling factor is non-finite or not positive.
    #[error("invalid scaling factor on {axis} axis: {value}")]
    InvalidFactor { axis: &'static str, value: f64 },

    /// The underlying parameter store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A lock was poisoned by a panicking writer.
    #[error("lock poisoned")]
    LockError,
}

/// Result type for inheritance and lineage operations.
pub type LineageResult<T> = Result<T, LineageError>;
