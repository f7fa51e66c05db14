//! Process-wide tracing setup.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize tracing/logging. Safe to call more than once.
pub fn init() {
    tracing::init();
}
