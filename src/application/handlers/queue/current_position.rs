//! CurrentPositionHandler - Query handler for "who is being served".

use std::sync::Arc;

use crate::domain::queue::{Position, QueueError, QueueKey};
use crate::ports::{EntryFilter, PositionOrder, QueueLedger};

/// Query for the position currently at the front of a queue.
#[derive(Debug, Clone)]
pub struct CurrentPositionQuery {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub hospital_id: String,
}

/// Returns the smallest position among entries that have not been called
/// forward, or `None` when no such entry exists.
pub struct CurrentPositionHandler {
    ledger: Arc<dyn QueueLedger>,
}

impl CurrentPositionHandler {
    pub fn new(ledger: Arc<dyn QueueLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(
        &self,
        query: CurrentPositionQuery,
    ) -> Result<Option<Position>, QueueError> {
        let key = QueueKey::parse(query.doctor_id, &query.appointment_date, &query.hospital_id)?;

        let waiting = self
            .ledger
            .find(&key, EntryFilter::waiting(), PositionOrder::Ascending)
            .await?;

        Ok(waiting.first().map(|entry| entry.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::queue::test_support::MockLedger;
    use crate::domain::foundation::TicketId;
    use crate::domain::queue::QueueEntry;

    fn key() -> QueueKey {
        QueueKey::parse(5, "2024-10-10", "H1").unwrap()
    }

    fn query() -> CurrentPositionQuery {
        CurrentPositionQuery {
            doctor_id: 5,
            appointment_date: "2024-10-10".to_string(),
            hospital_id: "H1".to_string(),
        }
    }

    fn entry(position: u32, pending: bool) -> QueueEntry {
        let mut e = QueueEntry::new(key(), Position::new(position), TicketId::new());
        if pending {
            e.mark_pending();
        }
        e
    }

    #[tokio::test]
    async fn returns_smallest_waiting_position() {
        let h = CurrentPositionHandler::new(Arc::new(MockLedger::with_entries(vec![
            entry(0, true),
            entry(1, false),
            entry(2, false),
        ])));

        assert_eq!(h.handle(query()).await.unwrap(), Some(Position::new(1)));
    }

    #[tokio::test]
    async fn none_when_queue_is_empty() {
        let h = CurrentPositionHandler::new(Arc::new(MockLedger::new()));
        assert_eq!(h.handle(query()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn none_when_every_entry_is_pending() {
        let h = CurrentPositionHandler::new(Arc::new(MockLedger::with_entries(vec![
            entry(0, true),
            entry(1, true),
        ])));
        assert_eq!(h.handle(query()).await.unwrap(), None);
    }
}
