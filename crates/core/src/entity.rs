//! Entity trait: something with identity that persists across edits.

/// Entity marker + identity accessor.
///
/// Warehouses are entities: their stock map changes on every reconciliation
/// pass but the location keeps naming the same warehouse.
pub trait Entity {
    type Id: ?Sized + Eq + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
