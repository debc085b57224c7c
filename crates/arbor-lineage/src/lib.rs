//! Arbor inheritance packaging and lineage audit.
//!
//! Consumers never read the canonical store directly: they request an
//! [`InheritancePackage`], an immutable scaled snapshot derived through a
//! named [`Profile`]. Every issuance is appended to a bounded, append-only
//! lineage ledger used purely for audit and introspection.
//!
//! # Invariants
//!
//! - Packages are immutable snapshots; no push updates ever occur.
//! - Identical store state + profile + overrides derive identical
//!   parameters (only id and timestamp differ).
//! - Per-consumer lineage order is FIFO.

#![deny(unsafe_code)]

pub mod error;
pub mod ledger;
pub mod package;
pub mod packager;
pub mod profile;

// ── Re-exports ──────────────────────────────────────────────────────

pub use error::{LineageError, LineageResult};
pub use ledger::{LineageConfig, LineageLedger, LineageRecord};
pub use package::{derive_parameters, InheritancePackage};
pub use packager::{InheritancePackager, InheritanceTree};
pub use profile::{CustomFactors, Profile, ScalingFactors};
