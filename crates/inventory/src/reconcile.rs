//! Reconciliation of warehouse stock maps against a specification set.
//!
//! After a pass, a warehouse holds exactly the keys derivable from the
//! specifications (or only [`DEFAULT_KEY`] when there are no variants).
//! Records of surviving keys are carried over untouched, new keys start at
//! zero, and keys that are no longer derivable are dropped.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::combination::generate_combinations;
use crate::dimension::SpecificationSet;
use crate::key::{CombinationKey, DEFAULT_KEY, encode_key};
use crate::stock::{StockRecord, WarehouseInventory};

/// What the key set of a product looks like for a given specification set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatrixShape {
    /// No named dimensions: the product has a single `default` variant.
    Default,
    /// `count` combinations (saturating, duplicates in values included).
    Variants { count: usize },
    /// `dimension` has no selectable values, so no combination exists and the
    /// stock maps collapse to `default`. Callers should warn about this.
    Exhausted { dimension: String },
}

impl MatrixShape {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, MatrixShape::Exhausted { .. })
    }
}

/// Classify `specs` without expanding it.
pub fn matrix_shape(specs: &SpecificationSet) -> MatrixShape {
    let mut count: usize = 1;
    let mut any = false;
    for dimension in specs.named() {
        let n = dimension.selectable_count();
        if n == 0 {
            return MatrixShape::Exhausted {
                dimension: dimension.name.clone(),
            };
        }
        any = true;
        count = count.saturating_mul(n);
    }

    if any {
        MatrixShape::Variants { count }
    } else {
        MatrixShape::Default
    }
}

/// Keys every warehouse must hold for `specs`, in generation order, without
/// duplicates.
pub fn target_keys(specs: &SpecificationSet) -> Vec<CombinationKey> {
    let combos = generate_combinations(specs);
    if combos.is_empty() {
        return vec![DEFAULT_KEY.to_string()];
    }

    let mut seen = HashSet::with_capacity(combos.len());
    combos
        .iter()
        .map(encode_key)
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Counts from one reconciliation pass over one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub kept: usize,
    pub added: usize,
    pub dropped: usize,
    pub shape: MatrixShape,
}

impl ReconcileReport {
    pub fn changed(&self) -> bool {
        self.added > 0 || self.dropped > 0
    }
}

/// Rebuild `warehouse`'s stock map for `specs`.
pub fn reconcile_warehouse(
    specs: &SpecificationSet,
    warehouse: WarehouseInventory,
) -> WarehouseInventory {
    let shape = matrix_shape(specs);
    let keys = target_keys(specs);
    reconcile_against(&keys, shape, warehouse).0
}

/// Like [`reconcile_warehouse`], also returning what changed.
pub fn reconcile_warehouse_with_report(
    specs: &SpecificationSet,
    warehouse: WarehouseInventory,
) -> (WarehouseInventory, ReconcileReport) {
    let shape = matrix_shape(specs);
    let keys = target_keys(specs);
    reconcile_against(&keys, shape, warehouse)
}

/// Reconcile every warehouse of a product against the same specifications.
///
/// The target key set is computed once, so all warehouses end up with an
/// identical key set.
pub fn reconcile_product(
    specs: &SpecificationSet,
    warehouses: Vec<WarehouseInventory>,
) -> Vec<WarehouseInventory> {
    reconcile_product_with_report(specs, warehouses)
        .into_iter()
        .map(|(warehouse, _)| warehouse)
        .collect()
}

/// Like [`reconcile_product`], with one report per warehouse.
pub fn reconcile_product_with_report(
    specs: &SpecificationSet,
    warehouses: Vec<WarehouseInventory>,
) -> Vec<(WarehouseInventory, ReconcileReport)> {
    let shape = matrix_shape(specs);
    let keys = target_keys(specs);
    warehouses
        .into_iter()
        .map(|w| reconcile_against(&keys, shape.clone(), w))
        .collect()
}

fn reconcile_against(
    keys: &[CombinationKey],
    shape: MatrixShape,
    warehouse: WarehouseInventory,
) -> (WarehouseInventory, ReconcileReport) {
    let WarehouseInventory {
        location,
        inventory: mut previous,
    } = warehouse;

    let mut inventory = BTreeMap::new();
    let mut kept = 0;
    let mut added = 0;
    for key in keys {
        let record = match previous.remove(key) {
            Some(record) => {
                kept += 1;
                record
            }
            None => {
                added += 1;
                StockRecord::default()
            }
        };
        inventory.insert(key.clone(), record);
    }
    let dropped = previous.len();

    tracing::debug!(
        location = %location,
        kept,
        added,
        dropped,
        shape = ?shape,
        "reconciled warehouse stock map"
    );

    (
        WarehouseInventory { location, inventory },
        ReconcileReport {
            kept,
            added,
            dropped,
            shape,
        },
    )
}
