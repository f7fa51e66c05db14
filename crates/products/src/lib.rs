//! Product editing aggregate.
//!
//! Holds a product's specification dimensions and warehouses, validates edits
//! as commands, and reconciles every warehouse's stock map after each
//! specification change. Deterministic domain logic only (no IO, no storage).

pub mod product;

pub use product::{
    AddDimension, AddDimensionValue, AddWarehouse, CreateProduct, DimensionAdded,
    DimensionRemoved, DimensionValueAdded, DimensionValueRemoved, Product, ProductCommand,
    ProductCreated, ProductEvent, RemoveDimension, RemoveDimensionValue, RemoveWarehouse,
    SetStock, StockSet, WarehouseAdded, WarehouseRemoved,
};
