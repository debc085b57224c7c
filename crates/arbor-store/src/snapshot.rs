//! Store snapshot export and restore.
//!
//! Optional process-restart persistence: the coefficient set and shape
//! catalog serialize to a single JSON document. The encoding is an
//! implementation detail, not a compatibility surface.

use std::collections::BTreeMap;

use arbor_types::{CompositeShape, ParameterSet};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::store::ParameterStore;

/// A point-in-time export of a store's parameters and catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub parameters: ParameterSet,
    pub shapes: BTreeMap<String, CompositeShape>,
}

impl StoreSnapshot {
    /// Capture the current state of a store.
    pub fn capture(store: &ParameterStore) -> StoreResult<Self> {
        let parameters = store.get_parameters()?;
        let mut shapes = BTreeMap::new();
        for name in store.shape_names()? {
            if let Some(shape) = store.shape(&name)? {
                shapes.insert(name, shape);
            }
        }
        Ok(Self { parameters, shapes })
    }

    /// Rebuild a store from this snapshot. Parameters and every shape
    /// are re-validated; the catalog comes back exactly as exported.
    pub fn restore(self) -> StoreResult<ParameterStore> {
        ParameterStore::from_parts(self.parameters, self.shapes)
    }

    /// Encode as a JSON document.
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from a JSON document.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
