//! Per-variant stock counters and the warehouse stock map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use varistock_core::{Entity, ValueObject};

use crate::key::CombinationKey;

/// Counters kept for one variant in one warehouse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockRecord {
    pub quantity: u64,
    pub min_quantity: u64,
    pub defective_quantity: u64,
}

impl ValueObject for StockRecord {}

/// Addressable counter of a [`StockRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StockField {
    Quantity,
    MinQuantity,
    DefectiveQuantity,
}

impl StockRecord {
    pub fn get(&self, field: StockField) -> u64 {
        match field {
            StockField::Quantity => self.quantity,
            StockField::MinQuantity => self.min_quantity,
            StockField::DefectiveQuantity => self.defective_quantity,
        }
    }

    pub fn set(&mut self, field: StockField, value: u64) {
        match field {
            StockField::Quantity => self.quantity = value,
            StockField::MinQuantity => self.min_quantity = value,
            StockField::DefectiveQuantity => self.defective_quantity = value,
        }
    }

    /// On-hand quantity is under the configured minimum.
    pub fn is_below_minimum(&self) -> bool {
        self.quantity < self.min_quantity
    }
}

/// Stock map of one warehouse, keyed by combination key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseInventory {
    pub location: String,
    #[serde(default)]
    pub inventory: BTreeMap<CombinationKey, StockRecord>,
}

impl Entity for WarehouseInventory {
    type Id = str;

    fn id(&self) -> &str {
        &self.location
    }
}

impl WarehouseInventory {
    /// Empty warehouse; reconcile it before use so it gets the product's keys.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            inventory: BTreeMap::new(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inventory.keys().map(String::as_str)
    }

    pub fn record(&self, key: &str) -> Option<&StockRecord> {
        self.inventory.get(key)
    }

    /// Read a counter; absent keys read as zero and are not created.
    pub fn get(&self, key: &str, field: StockField) -> u64 {
        self.inventory.get(key).map_or(0, |r| r.get(field))
    }

    /// Write a counter, creating a zeroed record for an unknown key.
    pub fn set(&mut self, key: &str, field: StockField, value: u64) {
        self.inventory
            .entry(key.to_string())
            .or_default()
            .set(field, value);
    }

    /// Keys whose quantity is under their minimum, in key order.
    pub fn low_stock(&self) -> Vec<&str> {
        self.inventory
            .iter()
            .filter(|(_, r)| r.is_below_minimum())
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

/// Read `field` of `key` in `warehouse`, or `0` when the key is absent.
pub fn get_stock(warehouse: &WarehouseInventory, key: &str, field: StockField) -> u64 {
    warehouse.get(key, field)
}

/// Set `field` of `key`, creating the key with zeroed counters if needed.
///
/// Membership in the current key set is not checked; reconcile afterwards if
/// the specifications may have changed.
pub fn set_stock(
    mut warehouse: WarehouseInventory,
    key: &str,
    field: StockField,
    value: u64,
) -> WarehouseInventory {
    warehouse.set(key, field, value);
    warehouse
}
