//! `varistock-core` — shared domain building blocks.
//!
//! Pure domain primitives only: the error model, identifiers and the traits the
//! product and inventory crates implement. Nothing here performs IO.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::ProductId;
pub use value_object::ValueObject;
