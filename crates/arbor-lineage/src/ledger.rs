//! The lineage ledger — append-only audit trail of issued packages.
//!
//! Used only for audit and introspection, never for control flow. The
//! ledger is bounded: once the retention cap is hit, the oldest record is
//! evicted first. Per-consumer ordering is FIFO by construction since the
//! ledger itself is append-only.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::RwLock;

use arbor_types::PackageId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LineageError, LineageResult};
use crate::profile::Profile;

// ── Lineage Record ──────────────────────────────────────────────────

/// One issuance event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineageRecord {
    pub package_id: PackageId,
    pub consumer_name: String,
    pub profile: Profile,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// ── Config ──────────────────────────────────────────────────────────

/// Configuration for the lineage ledger.
#[derive(Clone, Copy, Debug)]
pub struct LineageConfig {
    /// Maximum retained lineage records; oldest evicted first.
    pub max_retained_records: usize,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            max_retained_records: 256,
        }
    }
}

// ── Ledger ──────────────────────────────────────────────────────────

/// Bounded, thread-safe, append-only record list.
pub struct LineageLedger {
    records: RwLock<VecDeque<LineageRecord>>,
    max_retained: usize,
}

impl LineageLedger {
    pub fn new(config: LineageConfig) -> Self {
        Self {
            records: RwLock::new(VecDeque::new()),
            max_retained: config.max_retained_records.max(1),
        }
    }

    /// Append a record, evicting the oldest if the cap is exceeded.
    pub fn append(&self, record: LineageRecord) -> LineageResult<()> {
        let mut records = self.records.write().map_err(|_| LineageError::LockError)?;
        records.push_back(record);
        while records.len() > self.max_retained {
            if let Some(evicted) = records.pop_front() {
                debug!(package = %evicted.package_id, "lineage record evicted");
            }
        }
        Ok(())
    }

    /// Chronological records for one consumer; empty if the consumer has
    /// never requested inheritance.
    pub fn for_consumer(&self, consumer_name: &str) -> LineageResult<Vec<LineageRecord>> {
        let records = self.records.read().map_err(|_| LineageError::LockError)?;
        Ok(records
            .iter()
            .filter(|r| r.consumer_name == consumer_name)
            .cloned()
            .collect())
    }

    /// Number of retained records.
    pub fn len(&self) -> LineageResult<usize> {
        let records = self.records.read().map_err(|_| LineageError::LockError)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> LineageResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Per-consumer retained package counts.
    pub fn consumer_counts(&self) -> LineageResult<BTreeMap<String, usize>> {
        let records = self.records.read().map_err(|_| LineageError::LockError)?;
        let mut counts = BTreeMap::new();
        for record in records.iter() {
            *counts.entry(record.consumer_name.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Distinct consumer names among retained records.
    pub fn distinct_consumers(&self) -> LineageResult<usize> {
        let records = self.records.read().map_err(|_| LineageError::LockError)?;
        let names: BTreeSet<_> = records.iter().map(|r| r.consumer_name.as_str()).collect();
        Ok(names.len())
    }

    /// The profile appearing most often among retained records.
    pub fn most_common_profile(&self) -> LineageResult<Option<Profile>> {
        let records = self.records.read().map_err(|_| LineageError::LockError)?;
        let mut counts: BTreeMap<String, (usize, Profile)> = BTreeMap::new();
        for record in records.iter() {
            let entry = counts
                .entry(record.profile.to_string())
                .or_insert((0, record.profile));
            entry.0 += 1;
        }
        Ok(counts
            .into_values()
            .max_by_key(|(count, _)| *count)
            .map(|(_, profile)| profile))
    }
}
