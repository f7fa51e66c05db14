//! Variant stock matrix.
//!
//! Derives every variant of a product from its specification dimensions and
//! keeps each warehouse's per-variant stock map in sync with them. Pure,
//! deterministic domain logic: no IO, no storage, nothing fails.

pub mod combination;
pub mod dimension;
pub mod document;
pub mod key;
pub mod reconcile;
pub mod stock;

pub use combination::{Combination, generate_combinations};
pub use dimension::{Dimension, SpecificationSet};
pub use document::ProductDocument;
pub use key::{CombinationKey, DEFAULT_KEY, decode_key, encode_key};
pub use reconcile::{
    MatrixShape, ReconcileReport, matrix_shape, reconcile_product, reconcile_product_with_report,
    reconcile_warehouse, reconcile_warehouse_with_report, target_keys,
};
pub use stock::{StockField, StockRecord, WarehouseInventory, get_stock, set_stock};
