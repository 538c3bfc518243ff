//! In-memory ticket directory for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, PatientId, TicketId};
use crate::ports::{TicketDirectory, TicketInfo};

/// In-memory `TicketDirectory` seeded by tests.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned. Acceptable for test
/// code; this adapter should NOT be used in production.
pub struct InMemoryTicketDirectory {
    tickets: RwLock<HashMap<TicketId, TicketInfo>>,
}

impl InMemoryTicketDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            tickets: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a ticket and returns its id.
    pub fn issue(&self, patient_name: &str) -> TicketId {
        let ticket_id = TicketId::new();
        self.tickets
            .write()
            .expect("InMemoryTicketDirectory: write lock poisoned")
            .insert(
                ticket_id,
                TicketInfo {
                    ticket_id,
                    patient_id: PatientId::new(),
                    patient_name: patient_name.to_string(),
                    patient_contact: None,
                },
            );
        ticket_id
    }
}

impl Default for InMemoryTicketDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketDirectory for InMemoryTicketDirectory {
    async fn find(&self, ticket_id: TicketId) -> Result<Option<TicketInfo>, DomainError> {
        Ok(self
            .tickets
            .read()
            .expect("InMemoryTicketDirectory: lock poisoned")
            .get(&ticket_id)
            .cloned())
    }

    async fn find_many(
        &self,
        ticket_ids: &[TicketId],
    ) -> Result<HashMap<TicketId, TicketInfo>, DomainError> {
        let tickets = self
            .tickets
            .read()
            .expect("InMemoryTicketDirectory: lock poisoned");
        Ok(ticket_ids
            .iter()
            .filter_map(|id| tickets.get(id).map(|t| (*id, t.clone())))
            .collect())
    }
}
