//! In-memory queue ledger for testing.
//!
//! Deterministic, dependency-free implementation of the `QueueLedger`
//! port. Not for production use; the PostgreSQL adapter is the real store.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::queue::{QueueEntry, QueueKey};
use crate::ports::{EntryFilter, EntryPatch, PositionOrder, QueueLedger};

/// In-memory `QueueLedger`.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned. Acceptable for test
/// code; this adapter should NOT be used in production.
pub struct InMemoryQueueLedger {
    entries: RwLock<Vec<QueueEntry>>,
}

impl InMemoryQueueLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every entry across all keys (for assertions).
    pub fn all_entries(&self) -> Vec<QueueEntry> {
        self.entries
            .read()
            .expect("InMemoryQueueLedger: lock poisoned")
            .clone()
    }

    fn matches(entry: &QueueEntry, key: &QueueKey, filter: EntryFilter) -> bool {
        entry.key() == key
            && filter.position.map_or(true, |p| entry.position() == p)
            && filter.pending.map_or(true, |p| entry.is_pending() == p)
    }
}

impl Default for InMemoryQueueLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueLedger for InMemoryQueueLedger {
    async fn find(
        &self,
        key: &QueueKey,
        filter: EntryFilter,
        order: PositionOrder,
    ) -> Result<Vec<QueueEntry>, DomainError> {
        let mut found: Vec<QueueEntry> = self
            .entries
            .read()
            .expect("InMemoryQueueLedger: lock poisoned")
            .iter()
            .filter(|e| Self::matches(e, key, filter))
            .cloned()
            .collect();
        found.sort_by_key(|e| e.position());
        if matches!(order, PositionOrder::Descending) {
            found.reverse();
        }
        Ok(found)
    }

    async fn create(&self, entry: &QueueEntry) -> Result<(), DomainError> {
        let mut entries = self
            .entries
            .write()
            .expect("InMemoryQueueLedger: write lock poisoned");
        // Mirror the database's unique (key, position) constraint
        if entries
            .iter()
            .any(|e| e.key() == entry.key() && e.position() == entry.position())
        {
            return Err(DomainError::database(format!(
                "duplicate position {} for queue {}",
                entry.position(),
                entry.key()
            )));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn update_matching(
        &self,
        key: &QueueKey,
        filter: EntryFilter,
        patch: EntryPatch,
    ) -> Result<u64, DomainError> {
        let mut entries = self
            .entries
            .write()
            .expect("InMemoryQueueLedger: write lock poisoned");
        let mut updated = 0;
        for entry in entries.iter_mut() {
            if Self::matches(entry, key, filter) {
                if patch.pending == Some(true) {
                    entry.mark_pending();
                }
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn delete_matching(
        &self,
        key: &QueueKey,
        filter: EntryFilter,
    ) -> Result<u64, DomainError> {
        let mut entries = self
            .entries
            .write()
            .expect("InMemoryQueueLedger: write lock poisoned");
        let before = entries.len();
        entries.retain(|e| !Self::matches(e, key, filter));
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TicketId;
    use crate::domain::queue::Position;

    fn key() -> QueueKey {
        QueueKey::parse(5, "2024-10-10", "H1").unwrap()
    }

    #[tokio::test]
    async fn create_rejects_duplicate_position() {
        let ledger = InMemoryQueueLedger::new();
        let a = QueueEntry::new(key(), Position::first(), TicketId::new());
        let b = QueueEntry::new(key(), Position::first(), TicketId::new());

        ledger.create(&a).await.unwrap();
        assert!(ledger.create(&b).await.is_err());
    }

    #[tokio::test]
    async fn same_position_under_other_key_is_fine() {
        let ledger = InMemoryQueueLedger::new();
        let other = QueueKey::parse(6, "2024-10-10", "H1").unwrap();

        ledger
            .create(&QueueEntry::new(key(), Position::first(), TicketId::new()))
            .await
            .unwrap();
        ledger
            .create(&QueueEntry::new(other, Position::first(), TicketId::new()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn find_orders_by_position() {
        let ledger = InMemoryQueueLedger::new();
        for p in [2u32, 0, 1] {
            ledger
                .create(&QueueEntry::new(key(), Position::new(p), TicketId::new()))
                .await
                .unwrap();
        }

        let asc = ledger
            .find(&key(), EntryFilter::all(), PositionOrder::Ascending)
            .await
            .unwrap();
        assert_eq!(
            asc.iter().map(|e| e.position().as_u32()).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );

        let desc = ledger
            .find(&key(), EntryFilter::all(), PositionOrder::Descending)
            .await
            .unwrap();
        assert_eq!(desc[0].position().as_u32(), 2);
    }

    #[tokio::test]
    async fn update_matching_reports_touched_count() {
        let ledger = InMemoryQueueLedger::new();
        ledger
            .create(&QueueEntry::new(key(), Position::first(), TicketId::new()))
            .await
            .unwrap();

        let updated = ledger
            .update_matching(
                &key(),
                EntryFilter::at_position(Position::first()),
                EntryPatch::set_pending(),
            )
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let missed = ledger
            .update_matching(
                &key(),
                EntryFilter::at_position(Position::new(9)),
                EntryPatch::set_pending(),
            )
            .await
            .unwrap();
        assert_eq!(missed, 0);
    }
}
