//! Event trait shared by aggregates.

use chrono::{DateTime, Utc};

/// A fact emitted by an aggregate's command handling.
///
/// Events are immutable and carry a stable type name and schema version so
/// they can be stored or forwarded by an outer layer.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "products.dimension.added").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// Business time at which the edit happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}
