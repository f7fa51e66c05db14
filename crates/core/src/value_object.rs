//! Value object marker.

/// Marker for types compared purely by value.
///
/// Dimensions, combinations and stock records are value objects: two stock
/// records with the same counters are interchangeable, which is what lets
/// reconciliation carry a record forward by copying it.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
