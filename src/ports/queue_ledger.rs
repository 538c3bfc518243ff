//! QueueLedger port - the narrow interface to the durable record store.
//!
//! The ledger is the single source of truth for queue state. The core
//! consumes it through filter-and-sort queries scoped to a `QueueKey`; it
//! never sees the storage engine.
//!
//! # Design
//!
//! - **Match-and-act**: `update_matching`/`delete_matching` apply a filter
//!   and report how many rows were touched, so callers never fetch an entry
//!   and mutate it by identity. Two staff members acting on the same
//!   position cannot lose each other's update.
//! - **Per-record atomicity**: implementations guarantee a reader never
//!   observes a partially-applied write; cross-operation transactions are
//!   not assumed.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::queue::{Position, QueueEntry, QueueKey};

/// Filter over entries within one queue key.
///
/// `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Match a single position.
    pub position: Option<Position>,
    /// Match on the pending flag.
    pub pending: Option<bool>,
}

impl EntryFilter {
    /// Matches every entry under the key.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches the entry at exactly this position.
    pub fn at_position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Matches entries that have not been called forward yet.
    pub fn waiting() -> Self {
        Self {
            pending: Some(false),
            ..Self::default()
        }
    }
}

/// Field changes applied by `update_matching`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryPatch {
    /// New value for the pending flag.
    pub pending: Option<bool>,
}

impl EntryPatch {
    /// Marks matched entries as called forward.
    pub fn set_pending() -> Self {
        Self {
            pending: Some(true),
        }
    }
}

/// Sort direction for position-ordered reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionOrder {
    Ascending,
    Descending,
}

/// Port to the durable queue store.
///
/// Implementations must ensure:
/// - `create` fails (rather than silently replacing) when an entry with the
///   same key and position already exists
/// - mutations are atomic per record; no partial entry is ever visible
#[async_trait]
pub trait QueueLedger: Send + Sync {
    /// Reads entries for a key, filtered and ordered by position.
    ///
    /// A fresh query every call; results are never cached across calls.
    async fn find(
        &self,
        key: &QueueKey,
        filter: EntryFilter,
        order: PositionOrder,
    ) -> Result<Vec<QueueEntry>, DomainError>;

    /// Persists a new entry.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on write failure or a duplicate (key, position)
    async fn create(&self, entry: &QueueEntry) -> Result<(), DomainError>;

    /// Applies a patch to every entry matching the filter.
    ///
    /// Returns how many entries were updated; zero is not an error.
    async fn update_matching(
        &self,
        key: &QueueKey,
        filter: EntryFilter,
        patch: EntryPatch,
    ) -> Result<u64, DomainError>;

    /// Deletes every entry matching the filter.
    ///
    /// Returns how many entries were deleted; zero is not an error.
    async fn delete_matching(
        &self,
        key: &QueueKey,
        filter: EntryFilter,
    ) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_ledger_is_object_safe() {
        fn _accepts_dyn(_ledger: &dyn QueueLedger) {}
    }

    #[test]
    fn filter_constructors_set_expected_fields() {
        assert_eq!(EntryFilter::all(), EntryFilter::default());
        assert_eq!(
            EntryFilter::at_position(Position::new(2)).position,
            Some(Position::new(2))
        );
        assert_eq!(EntryFilter::waiting().pending, Some(false));
    }

    #[test]
    fn set_pending_patch_targets_pending_flag() {
        assert_eq!(EntryPatch::set_pending().pending, Some(true));
    }
}
