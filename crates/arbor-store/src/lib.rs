//! Arbor parameter store.
//!
//! Single source of truth for the canonical coefficient set and the
//! composite-shape catalog. Consumers never touch the live set: reads are
//! cloned snapshots, writes go through one validated, all-or-nothing
//! mutation path.
//!
//! # Invariants
//!
//! - A mutation either commits a fully valid parameter set or leaves the
//!   store byte-for-byte unchanged.
//! - Catalogued shapes are immutable; names are unique.

#![deny(unsafe_code)]

pub mod error;
pub mod seed;
pub mod snapshot;
pub mod store;

// ── Re-exports ──────────────────────────────────────────────────────

pub use error::{StoreError, StoreResult};
pub use snapshot::StoreSnapshot;
pub use store::{IntegrityReport, ParameterStore};
