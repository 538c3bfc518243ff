//! MarkPendingHandler - Command handler for calling the next patient.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, SerializableDomainEvent, Timestamp};
use crate::domain::queue::{EntryCalled, Position, QueueError, QueueKey};
use crate::ports::{EntryFilter, EntryPatch, EventPublisher, QueueLedger};

/// Command to call the entry at an exact position forward for service.
#[derive(Debug, Clone)]
pub struct MarkPendingCommand {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub hospital_id: String,
    pub position: u32,
}

/// Result of a call-forward request.
#[derive(Debug, Clone)]
pub struct MarkPendingResult {
    /// False when no entry matched; an idempotent no-op, not an error.
    pub called: bool,
}

/// Handler for the "call next patient" transition.
///
/// The flip is applied as a filtered update (match-and-act), never
/// fetch-then-mutate-by-identity, so two staff members calling positions
/// simultaneously cannot lose each other's update. The transition is
/// one-way: re-queueing a served patient means a new entry.
pub struct MarkPendingHandler {
    ledger: Arc<dyn QueueLedger>,
    publisher: Arc<dyn EventPublisher>,
}

impl MarkPendingHandler {
    pub fn new(ledger: Arc<dyn QueueLedger>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { ledger, publisher }
    }

    pub async fn handle(
        &self,
        cmd: MarkPendingCommand,
        metadata: CommandMetadata,
    ) -> Result<MarkPendingResult, QueueError> {
        let key = QueueKey::parse(cmd.doctor_id, &cmd.appointment_date, &cmd.hospital_id)?;
        let position = Position::new(cmd.position);

        let updated = self
            .ledger
            .update_matching(
                &key,
                EntryFilter::at_position(position),
                EntryPatch::set_pending(),
            )
            .await?;

        if updated == 0 {
            tracing::debug!(queue_key = %key, position = %position, "call matched nothing");
            return Ok(MarkPendingResult { called: false });
        }

        tracing::info!(
            queue_key = %key,
            position = %position,
            correlation_id = metadata.correlation_id(),
            "entry called forward"
        );

        let event = EntryCalled {
            event_id: EventId::new(),
            queue_key: key,
            position,
            called_at: Timestamp::now(),
        };
        self.publisher
            .publish(
                event
                    .to_envelope()
                    .with_correlation_id(metadata.correlation_id()),
            )
            .await?;

        Ok(MarkPendingResult { called: true })
    }
}
