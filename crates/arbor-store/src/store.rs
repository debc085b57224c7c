//! The canonical parameter store.
//!
//! Single source of truth for the coefficient set and the shape catalog.
//! Readers always receive cloned snapshots; the only two writer paths
//! (`mutate`, `register_shape`) are serialized behind write locks, and a
//! mutation commits only if the resulting set passes validation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use arbor_types::{CompositeShape, ParameterSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::seed;

// ── Parameter Store ─────────────────────────────────────────────────

/// Owner of the canonical coefficients and the composite-shape catalog.
pub struct ParameterStore {
    parameters: RwLock<ParameterSet>,
    catalog: RwLock<BTreeMap<String, CompositeShape>>,
    mutation_count: AtomicU64,
}

impl ParameterStore {
    /// Create a store with the canonical defaults and the seeded catalog.
    pub fn new() -> Self {
        let parameters = ParameterSet::default();
        let catalog = seed::seed_catalog(&parameters)
            .into_iter()
            .map(|(name, shape)| (name.to_string(), shape))
            .collect();
        Self {
            parameters: RwLock::new(parameters),
            catalog: RwLock::new(catalog),
            mutation_count: AtomicU64::new(0),
        }
    }

    /// Create a store from an explicit parameter set, seeding the catalog
    /// from it. The set is validated first.
    pub fn with_parameters(parameters: ParameterSet) -> StoreResult<Self> {
        parameters.validate()?;
        let catalog = seed::seed_catalog(&parameters)
            .into_iter()
            .map(|(name, shape)| (name.to_string(), shape))
            .collect();
        Ok(Self {
            parameters: RwLock::new(parameters),
            catalog: RwLock::new(catalog),
            mutation_count: AtomicU64::new(0),
        })
    }

    /// Build a store from explicit parts, validating everything. Used by
    /// snapshot restore so the catalog comes back exactly as exported.
    pub(crate) fn from_parts(
        parameters: ParameterSet,
        catalog: BTreeMap<String, CompositeShape>,
    ) -> StoreResult<Self> {
        parameters.validate()?;
        for (name, shape) in &catalog {
            if shape.is_empty() {
                return Err(StoreError::EmptyShape(name.clone()));
            }
            shape.validate().map_err(|source| StoreError::InvalidComponent {
                name: name.clone(),
                source,
            })?;
        }
        Ok(Self {
            parameters: RwLock::new(parameters),
            catalog: RwLock::new(catalog),
            mutation_count: AtomicU64::new(0),
        })
    }

    /// Read-only snapshot of the current coefficients. Never the live
    /// reference, so callers cannot mutate the store from outside.
    pub fn get_parameters(&self) -> StoreResult<ParameterSet> {
        let guard = self.parameters.read().map_err(|_| StoreError::LockError)?;
        Ok(guard.clone())
    }

    /// Apply a pure mutation function to the coefficient set.
    ///
    /// All-or-nothing: the candidate set is validated while the write
    /// lock is held, and on failure the store is left exactly as it was.
    /// Returns the committed set.
    pub fn mutate<F>(&self, mutation: F) -> StoreResult<ParameterSet>
    where
        F: FnOnce(&ParameterSet) -> ParameterSet,
    {
        let mut guard = self.parameters.write().map_err(|_| StoreError::LockError)?;
        let candidate = mutation(&guard);
        if let Err(e) = candidate.validate() {
            warn!(error = %e, "parameter mutation rejected");
            return Err(StoreError::MutationRejected(e));
        }
        *guard = candidate.clone();
        let count = self.mutation_count.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(mutations = count, "parameter mutation committed");
        Ok(candidate)
    }

    /// Number of committed mutations.
    pub fn mutation_count(&self) -> u64 {
        self.mutation_count.load(Ordering::Relaxed)
    }

    // ── Shape catalog ───────────────────────────────────────────────

    /// Register a new composite shape under a unique name.
    pub fn register_shape(&self, name: &str, shape: CompositeShape) -> StoreResult<()> {
        if shape.is_empty() {
            return Err(StoreError::EmptyShape(name.to_string()));
        }
        shape.validate().map_err(|source| StoreError::InvalidComponent {
            name: name.to_string(),
            source,
        })?;

        let mut catalog = self.catalog.write().map_err(|_| StoreError::LockError)?;
        if catalog.contains_key(name) {
            return Err(StoreError::DuplicateShape(name.to_string()));
        }
        catalog.insert(name.to_string(), shape);
        debug!(shape = name, "shape registered");
        Ok(())
    }

    /// Look up a catalogued shape by name.
    pub fn shape(&self, name: &str) -> StoreResult<Option<CompositeShape>> {
        let catalog = self.catalog.read().map_err(|_| StoreError::LockError)?;
        Ok(catalog.get(name).cloned())
    }

    /// Whether a shape is catalogued under this name.
    pub fn has_shape(&self, name: &str) -> StoreResult<bool> {
        let catalog = self.catalog.read().map_err(|_| StoreError::LockError)?;
        Ok(catalog.contains_key(name))
    }

    /// All catalogued shape names, sorted.
    pub fn shape_names(&self) -> StoreResult<Vec<String>> {
        let catalog = self.catalog.read().map_err(|_| StoreError::LockError)?;
        Ok(catalog.keys().cloned().collect())
    }

    /// Number of catalogued shapes.
    pub fn shape_count(&self) -> StoreResult<usize> {
        let catalog = self.catalog.read().map_err(|_| StoreError::LockError)?;
        Ok(catalog.len())
    }

    // ── Introspection ───────────────────────────────────────────────

    /// Integrity report over the live parameters and catalog.
    pub fn integrity_report(&self) -> StoreResult<IntegrityReport> {
        let parameters = self.get_parameters()?;
        let mut issues = Vec::new();
        let parameters_valid = match parameters.validate() {
            Ok(()) => true,
            Err(e) => {
                issues.push(e.to_string());
                false
            }
        };

        let catalog = self.catalog.read().map_err(|_| StoreError::LockError)?;
        for (name, shape) in catalog.iter() {
            if let Err(e) = shape.validate() {
                issues.push(format!("shape {name}: {e}"));
            }
        }

        Ok(IntegrityReport {
            parameters_valid,
            shape_count: catalog.len(),
            mutation_count: self.mutation_count(),
            issues,
        })
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── Integrity Report ────────────────────────────────────────────────

/// Result of a store integrity check.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub parameters_valid: bool,
    pub shape_count: usize,
    pub mutation_count: u64,
    pub issues: Vec<String>,
}

impl IntegrityReport {
    /// Whether parameters and every catalogued shape are sound.
    pub fn is_clean(&self) -> bool {
        self.parameters_valid && self.issues.is_empty()
    }
}

impl std::fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Integrity(valid={}, shapes={}, mutations={}, issues={})",
            self.parameters_valid,
            self.shape_count,
            self.mutation_count,
            self.issues.len(),
        )
    }
}
