//! Aggregate traits for command/event domain models.

use crate::error::{DomainError, DomainResult};

/// Aggregate root: identity plus a version counter.
pub trait AggregateRoot {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Number of events applied so far.
    fn version(&self) -> u64;
}

/// Optimistic concurrency expectation for an aggregate.
///
/// Edits to one product must be serialized; a caller that read version `n`
/// passes `Exact(n)` so that an interleaved edit is detected instead of
/// silently overwritten.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    Any,
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "stale edit (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}

/// Pure decide/evolve split.
///
/// - `handle(&self, cmd)` validates a command and returns the events it produces.
/// - `apply(&mut self, event)` evolves state and must not fail.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    fn apply(&mut self, event: &Self::Event);

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Check the expected version, handle the command and apply its events.
    fn execute(
        &mut self,
        command: &Self::Command,
        expected: ExpectedVersion,
    ) -> Result<Vec<Self::Event>, Self::Error>
    where
        Self::Error: From<DomainError>,
    {
        expected.check(self.version())?;
        let events = self.handle(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_version_rejects_stale_edits() {
        assert!(ExpectedVersion::Exact(3).check(3).is_ok());
        assert!(matches!(
            ExpectedVersion::Exact(2).check(3),
            Err(DomainError::Conflict(_))
        ));
        assert!(ExpectedVersion::Any.check(42).is_ok());
    }
}
