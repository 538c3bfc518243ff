//! Queue command and query handlers.
//!
//! One handler per operation. Handlers are the only components permitted to
//! mutate queue state: they validate input before any ledger access,
//! delegate persistence to the `QueueLedger`, and publish events only after
//! a successful mutation.

mod current_position;
mod enqueue_patient;
mod list_queue;
mod mark_pending;
mod queue_total;
mod remove_entry;

pub use current_position::{CurrentPositionHandler, CurrentPositionQuery};
pub use enqueue_patient::{EnqueuePatientCommand, EnqueuePatientHandler, EnqueueResult};
pub use list_queue::{ListQueueHandler, ListQueueQuery, QueueEntryView};
pub use mark_pending::{MarkPendingCommand, MarkPendingHandler, MarkPendingResult};
pub use queue_total::{QueueTotalHandler, QueueTotalQuery};
pub use remove_entry::{RemoveEntryCommand, RemoveEntryHandler, RemoveEntryResult};

/// Mock port implementations shared by the handler tests in this module.
#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::foundation::{
        DomainError, ErrorCode, EventEnvelope, PatientId, TicketId,
    };
    use crate::domain::queue::{Position, QueueEntry, QueueKey};
    use crate::ports::{
        EntryFilter, EntryPatch, EventPublisher, PositionAllocator, PositionOrder,
        QueueLedger, TicketDirectory, TicketInfo,
    };

    /// In-memory ledger with an optional failure switch.
    pub struct MockLedger {
        entries: Mutex<Vec<QueueEntry>>,
        fail: bool,
    }

    impl MockLedger {
        pub fn new() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn with_entries(entries: Vec<QueueEntry>) -> Self {
            Self {
                entries: Mutex::new(entries),
                fail: false,
            }
        }

        pub fn entries(&self) -> Vec<QueueEntry> {
            self.entries.lock().unwrap().clone()
        }

        fn check(&self) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::database("Simulated ledger failure"));
            }
            Ok(())
        }

        fn matches(entry: &QueueEntry, key: &QueueKey, filter: EntryFilter) -> bool {
            entry.key() == key
                && filter.position.map_or(true, |p| entry.position() == p)
                && filter.pending.map_or(true, |p| entry.is_pending() == p)
        }
    }

    #[async_trait]
    impl QueueLedger for MockLedger {
        async fn find(
            &self,
            key: &QueueKey,
            filter: EntryFilter,
            order: PositionOrder,
        ) -> Result<Vec<QueueEntry>, DomainError> {
            self.check()?;
            let mut found: Vec<QueueEntry> = self
                .entries
                .lock()
                .unwrap()
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
            self.check()?;
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn update_matching(
            &self,
            key: &QueueKey,
            filter: EntryFilter,
            patch: EntryPatch,
        ) -> Result<u64, DomainError> {
            self.check()?;
            let mut entries = self.entries.lock().unwrap();
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
            self.check()?;
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| !Self::matches(e, key, filter));
            Ok((before - entries.len()) as u64)
        }
    }

    /// Sequential allocator with an optional failure switch.
    pub struct MockAllocator {
        counters: Mutex<HashMap<QueueKey, u32>>,
        fail: bool,
    }

    impl MockAllocator {
        pub fn new() -> Self {
            Self {
                counters: Mutex::new(HashMap::new()),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                counters: Mutex::new(HashMap::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl PositionAllocator for MockAllocator {
        async fn next_position(&self, key: &QueueKey) -> Result<Position, DomainError> {
            if self.fail {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated allocator failure",
                ));
            }
            let mut counters = self.counters.lock().unwrap();
            let counter = counters.entry(key.clone()).or_insert(0);
            let position = Position::new(*counter);
            *counter += 1;
            Ok(position)
        }
    }

    /// Capturing publisher.
    pub struct MockPublisher {
        published: Mutex<Vec<EventEnvelope>>,
    }

    impl MockPublisher {
        pub fn new() -> Self {
            Self {
                published: Mutex::new(Vec::new()),
            }
        }

        pub fn published(&self) -> Vec<EventEnvelope> {
            self.published.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventPublisher for MockPublisher {
        async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
            self.published.lock().unwrap().push(event);
            Ok(())
        }

        async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
            self.published.lock().unwrap().extend(events);
            Ok(())
        }
    }

    /// Directory backed by a fixed map.
    pub struct MockDirectory {
        tickets: HashMap<TicketId, TicketInfo>,
    }

    impl MockDirectory {
        pub fn empty() -> Self {
            Self {
                tickets: HashMap::new(),
            }
        }

        pub fn with_ticket(ticket_id: TicketId, patient_name: &str) -> Self {
            let mut tickets = HashMap::new();
            tickets.insert(
                ticket_id,
                TicketInfo {
                    ticket_id,
                    patient_id: PatientId::new(),
                    patient_name: patient_name.to_string(),
                    patient_contact: None,
                },
            );
            Self { tickets }
        }
    }

    #[async_trait]
    impl TicketDirectory for MockDirectory {
        async fn find(&self, ticket_id: TicketId) -> Result<Option<TicketInfo>, DomainError> {
            Ok(self.tickets.get(&ticket_id).cloned())
        }

        async fn find_many(
            &self,
            ticket_ids: &[TicketId],
        ) -> Result<HashMap<TicketId, TicketInfo>, DomainError> {
            Ok(ticket_ids
                .iter()
                .filter_map(|id| self.tickets.get(id).map(|t| (*id, t.clone())))
                .collect())
        }
    }
}
