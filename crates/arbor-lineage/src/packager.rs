//! The inheritance packager.
//!
//! Derives scoped, scaled parameter packages for named consumers without
//! ever exposing the canonical store, and records every issuance in the
//! lineage ledger.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use arbor_store::ParameterStore;
use arbor_types::PackageId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LineageError, LineageResult};
use crate::ledger::{LineageConfig, LineageLedger, LineageRecord};
use crate::package::{derive_parameters, InheritancePackage};
use crate::profile::{CustomFactors, Profile};

// ── Packager ────────────────────────────────────────────────────────

/// Issues inheritance packages against a shared parameter store.
pub struct InheritancePackager {
    store: Arc<ParameterStore>,
    ledger: LineageLedger,
    next_package_id: AtomicU64,
    /// Consumer names seen so far; unlike the ledger this is never
    /// evicted, since health scoring counts consumer kinds.
    consumers: RwLock<std::collections::BTreeSet<String>>,
}

impl InheritancePackager {
    pub fn new(store: Arc<ParameterStore>) -> Self {
        Self::with_config(store, LineageConfig::default())
    }

    pub fn with_config(store: Arc<ParameterStore>, config: LineageConfig) -> Self {
        Self {
            store,
            ledger: LineageLedger::new(config),
            next_package_id: AtomicU64::new(0),
            consumers: RwLock::new(std::collections::BTreeSet::new()),
        }
    }

    /// Derive a scoped parameter package for a consumer.
    ///
    /// Deterministic up to `package_id`/`created_at`: two calls against
    /// an unchanged store with the same profile and overrides yield
    /// identical `derived_parameters`.
    pub fn request_inheritance(
        &self,
        consumer_name: &str,
        profile: Profile,
        custom_factors: Option<&CustomFactors>,
    ) -> LineageResult<InheritancePackage> {
        let mut scaling = profile.factors();
        if let Some(custom) = custom_factors {
            scaling = scaling.with_overrides(custom);
        }
        scaling.validate()?;

        let snapshot = self.store.get_parameters()?;
        let derived_parameters = derive_parameters(&snapshot, &scaling);

        let package_id = PackageId(self.next_package_id.fetch_add(1, Ordering::Relaxed) + 1);
        let created_at = Utc::now();

        self.ledger.append(LineageRecord {
            package_id,
            consumer_name: consumer_name.to_string(),
            profile,
            created_at,
        })?;
        self.consumers
            .write()
            .map_err(|_| LineageError::LockError)?
            .insert(consumer_name.to_string());

        info!(consumer = consumer_name, %profile, %package_id, "inheritance package issued");

        Ok(InheritancePackage {
            package_id,
            consumer_name: consumer_name.to_string(),
            profile,
            scaling,
            derived_parameters,
            created_at,
        })
    }

    /// Chronological lineage for one consumer (empty if unknown).
    pub fn get_lineage(&self, consumer_name: &str) -> LineageResult<Vec<LineageRecord>> {
        self.ledger.for_consumer(consumer_name)
    }

    /// Total packages ever issued (not subject to ledger eviction).
    pub fn inheritance_count(&self) -> u64 {
        self.next_package_id.load(Ordering::Relaxed)
    }

    /// Distinct consumer names ever seen.
    pub fn distinct_consumer_count(&self) -> LineageResult<usize> {
        Ok(self
            .consumers
            .read()
            .map_err(|_| LineageError::LockError)?
            .len())
    }

    /// Summary of the inheritance tree for introspection.
    pub fn inheritance_tree(&self) -> LineageResult<InheritanceTree> {
        Ok(InheritanceTree {
            total_issued: self.inheritance_count(),
            retained_records: self.ledger.len()?,
            consumers: self.ledger.consumer_counts()?,
            most_common_profile: self.ledger.most_common_profile()?,
        })
    }

    /// Handle to the shared store.
    pub fn store(&self) -> &Arc<ParameterStore> {
        &self.store
    }
}

// ── Inheritance Tree ────────────────────────────────────────────────

/// Introspection summary over the lineage ledger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InheritanceTree {
    pub total_issued: u64,
    pub retained_records: usize,
    /// Retained package counts per consumer.
    pub consumers: BTreeMap<String, usize>,
    pub most_common_profile: Option<Profile>,
}

impl std::fmt::Display for InheritanceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lineage(issued={}, retained={}, consumers={})",
            self.total_issued,
            self.retained_records,
            self.consumers.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packager() -> InheritancePackager {
        InheritancePackager::new(Arc::new(ParameterStore::new()))
    }

    #[test]
    fn issues_monotonic_package_ids() {
        let packager = packager();
        let a = packager
            .request_inheritance("renderer", Profile::Balanced, None)
            .unwrap();
        let b = packager
            .request_inheritance("renderer", Profile::Balanced, None)
            .unwrap();
        assert!(a.package_id < b.package_id);
        assert_eq!(packager.inheritance_count(), 2);
    }

    #[test]
    fn identical_requests_yield_identical_parameters() {
        let packager = packager();
        let a = packager
            .request_inheritance("renderer", Profile::SigmoidWeighted, None)
            .unwrap();
        let b = packager
            .request_inheritance("renderer", Profile::SigmoidWeighted, None)
            .unwrap();
        assert_eq!(a.derived_parameters, b.derived_parameters);
        assert_ne!(a.package_id, b.package_id);
    }

    #[test]
    fn custom_factors_override_profile_axes() {
        let packager = packager();
        let custom = CustomFactors {
            sigmoid: Some(2.0),
            ..CustomFactors::default()
        };
        let package = packager
            .request_inheritance("tuner", Profile::Balanced, Some(&custom))
            .unwrap();
        assert_eq!(package.scaling.sigmoid, 2.0);
        assert!((package.derived_parameters.sigmoid_base.k - 2.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_custom_factor_rejected() {
        let packager = packager();
        let custom = CustomFactors {
            linear: Some(-3.0),
            ..CustomFactors::default()
        };
        let result = packager.request_inheritance("tuner", Profile::Balanced, Some(&custom));
        assert!(matches!(
            result,
            Err(LineageError::InvalidFactor { axis: "linear", .. })
        ));
    }

    #[test]
    fn lineage_tracks_per_consumer_history() {
        let packager = packager();
        packager
            .request_inheritance("a", Profile::Balanced, None)
            .unwrap();
        packager
            .request_inheritance("b", Profile::LinearWeighted, None)
            .unwrap();
        packager
            .request_inheritance("a", Profile::QuantumWeighted, None)
            .unwrap();

        let lineage = packager.get_lineage("a").unwrap();
        assert_eq!(lineage.len(), 2);
        assert_eq!(lineage[0].profile, Profile::Balanced);
        assert_eq!(lineage[1].profile, Profile::QuantumWeighted);
        assert!(packager.get_lineage("missing").unwrap().is_empty());
    }

    #[test]
    fn package_reflects_store_mutation() {
        let store = Arc::new(ParameterStore::new());
        let packager = InheritancePackager::new(Arc::clone(&store));

        let before = packager
            .request_inheritance("r", Profile::Balanced, None)
            .unwrap();
        store
            .mutate(|set| {
                let mut next = set.clone();
                next.sigmoid_base.k = 3.0;
                next
            })
            .unwrap();
        let after = packager
            .request_inheritance("r", Profile::Balanced, None)
            .unwrap();

        assert_eq!(before.derived_parameters.sigmoid_base.k, 1.0);
        assert_eq!(after.derived_parameters.sigmoid_base.k, 3.0);
        // The already-issued package is an immutable snapshot.
        assert_eq!(before.derived_parameters.sigmoid_base.k, 1.0);
    }

    #[test]
    fn inheritance_tree_summary() {
        let packager = packager();
        packager
            .request_inheritance("a", Profile::Balanced, None)
            .unwrap();
        packager
            .request_inheritance("a", Profile::Balanced, None)
            .unwrap();
        packager
            .request_inheritance("b", Profile::SigmoidWeighted, None)
            .unwrap();

        let tree = packager.inheritance_tree().unwrap();
        assert_eq!(tree.total_issued, 3);
        assert_eq!(tree.consumers.get("a"), Some(&2));
        assert_eq!(tree.most_common_profile, Some(Profile::Balanced));
        assert_eq!(packager.distinct_consumer_count().unwrap(), 2);
    }

    #[test]
    fn concurrent_consumers_preserve_per_consumer_fifo() {
        let packager = Arc::new(packager());
        let mut handles = Vec::new();
        for consumer in ["alpha", "beta", "gamma"] {
            let packager = Arc::clone(&packager);
            handles.push(std::thread::spawn(move || {
                for _ in 0..20 {
                    packager
                        .request_inheritance(consumer, Profile::Balanced, None)
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        for consumer in ["alpha", "beta", "gamma"] {
            let lineage = packager.get_lineage(consumer).unwrap();
            assert_eq!(lineage.len(), 20);
            assert!(lineage.windows(2).all(|w| w[0].package_id < w[1].package_id));
        }
        assert_eq!(packager.inheritance_count(), 60);
    }
}
