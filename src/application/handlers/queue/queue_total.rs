//! QueueTotalHandler - Query handler for a queue's entry count.

use std::sync::Arc;

use crate::domain::queue::{QueueError, QueueKey};
use crate::ports::{EntryFilter, PositionOrder, QueueLedger};

/// Query for the total number of entries under a key, pending or not.
#[derive(Debug, Clone)]
pub struct QueueTotalQuery {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub hospital_id: String,
}

/// Counts every entry for the key.
pub struct QueueTotalHandler {
    ledger: Arc<dyn QueueLedger>,
}

impl QueueTotalHandler {
    pub fn new(ledger: Arc<dyn QueueLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, query: QueueTotalQuery) -> Result<u64, QueueError> {
        let key = QueueKey::parse(query.doctor_id, &query.appointment_date, &query.hospital_id)?;

        let entries = self
            .ledger
            .find(&key, EntryFilter::all(), PositionOrder::Ascending)
            .await?;

        Ok(entries.len() as u64)
    }
}
