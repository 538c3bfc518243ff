//! RemoveEntryHandler - Command handler for deleting a queue entry.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, SerializableDomainEvent, Timestamp};
use crate::domain::queue::{EntryRemoved, Position, QueueError, QueueKey};
use crate::ports::{EntryFilter, EventPublisher, QueueLedger};

/// Command to delete the entry at an exact position within a queue.
#[derive(Debug, Clone)]
pub struct RemoveEntryCommand {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub hospital_id: String,
    pub position: u32,
}

/// Result of a remove request.
#[derive(Debug, Clone)]
pub struct RemoveEntryResult {
    /// False when no entry matched; an idempotent no-op, not an error.
    pub removed: bool,
}

/// Handler for staff removal of queue entries.
///
/// Deletion is match-and-act: a non-existent position deletes zero rows and
/// succeeds, so double-clicks and retries are harmless. Remaining positions
/// are never renumbered; gaps preserve position as a stable identity.
pub struct RemoveEntryHandler {
    ledger: Arc<dyn QueueLedger>,
    publisher: Arc<dyn EventPublisher>,
}

impl RemoveEntryHandler {
    pub fn new(ledger: Arc<dyn QueueLedger>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { ledger, publisher }
    }

    pub async fn handle(
        &self,
        cmd: RemoveEntryCommand,
        metadata: CommandMetadata,
    ) -> Result<RemoveEntryResult, QueueError> {
        let key = QueueKey::parse(cmd.doctor_id, &cmd.appointment_date, &cmd.hospital_id)?;
        let position = Position::new(cmd.position);

        let deleted = self
            .ledger
            .delete_matching(&key, EntryFilter::at_position(position))
            .await?;

        if deleted == 0 {
            tracing::debug!(queue_key = %key, position = %position, "remove matched nothing");
            return Ok(RemoveEntryResult { removed: false });
        }

        tracing::info!(
            queue_key = %key,
            position = %position,
            correlation_id = metadata.correlation_id(),
            "entry removed"
        );

        let event = EntryRemoved {
            event_id: EventId::new(),
            queue_key: key,
            position,
            removed_at: Timestamp::now(),
        };
        self.publisher
            .publish(
                event
                    .to_envelope()
                    .with_correlation_id(metadata.correlation_id()),
            )
            .await?;

        Ok(RemoveEntryResult { removed: true })
    }
}
