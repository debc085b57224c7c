//! Error types for the parameter store.

use arbor_types::{ComponentError, ParameterError};
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A shape with this name is already catalogued.
    #[error("duplicate shape: {0}")]
    DuplicateShape(String),

    /// A shape being registered contains a malformed component.
    #[error("invalid component in shape {name}: {source}")]
    InvalidComponent {
        name: String,
        #[source]
        source: ComponentError,
    },

    /// Shapes must carry at least one component.
    #[error("shape {0} has no components")]
    EmptyShape(String),

    /// A mutation produced a parameter set that fails validation; the
    /// store is left unchanged.
    #[error("mutation rejected: {0}")]
    MutationRejected(#[from] ParameterError),

    /// Snapshot encoding or decoding failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A lock was poisoned by a panicking writer.
    #[error("lock poisoned")]
    LockError,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
