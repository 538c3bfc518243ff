//! ListQueueHandler - Query handler for reading a queue in serving order.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{TicketId, Timestamp};
use crate::domain::queue::{Position, QueueError, QueueKey};
use crate::ports::{EntryFilter, PositionOrder, QueueLedger, TicketDirectory, TicketInfo};

/// Query for one queue's entries.
#[derive(Debug, Clone)]
pub struct ListQueueQuery {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub hospital_id: String,
}

/// One queue entry with its ticket data joined in.
///
/// `ticket` is `None` when the ticket subsystem has no record for the id;
/// the queue view must survive a lagging ticket store.
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntryView {
    pub position: Position,
    pub ticket_id: TicketId,
    pub pending: bool,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<TicketInfo>,
}

/// Handler for reading a queue in ascending position order.
///
/// Purely read-only: every call runs a fresh ledger query, so re-running
/// the same query always yields the latest state.
pub struct ListQueueHandler {
    ledger: Arc<dyn QueueLedger>,
    tickets: Arc<dyn TicketDirectory>,
}

impl ListQueueHandler {
    pub fn new(ledger: Arc<dyn QueueLedger>, tickets: Arc<dyn TicketDirectory>) -> Self {
        Self { ledger, tickets }
    }

    pub async fn handle(&self, query: ListQueueQuery) -> Result<Vec<QueueEntryView>, QueueError> {
        let key = QueueKey::parse(query.doctor_id, &query.appointment_date, &query.hospital_id)?;

        let entries = self
            .ledger
            .find(&key, EntryFilter::all(), PositionOrder::Ascending)
            .await?;

        let ticket_ids: Vec<TicketId> = entries.iter().map(|e| e.ticket_id()).collect();
        let mut tickets = self.tickets.find_many(&ticket_ids).await?;

        Ok(entries
            .into_iter()
            .map(|entry| QueueEntryView {
                position: entry.position(),
                ticket_id: entry.ticket_id(),
                pending: entry.is_pending(),
                created_at: entry.created_at(),
                ticket: tickets.remove(&entry.ticket_id()),
            })
            .collect())
    }
}
