//! Domain error model.

use thiserror::Error;

/// Result type used by the editing layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Rejection of a product edit.
///
/// The variant matrix itself never fails; these errors only come out of
/// command handling, where an edit is structurally invalid for the current
/// product state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed command input (blank names, duplicate dimensions).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The command targets a different aggregate than the one handling it.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The product, dimension, value or warehouse named by the command does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The edit would duplicate something that already exists.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
