//! EnqueuePatientHandler - Command handler for placing a patient in a queue.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, SerializableDomainEvent, TicketId};
use crate::domain::queue::{PatientQueued, QueueEntry, QueueError, QueueKey, TicketIssued};
use crate::ports::{EventPublisher, PositionAllocator, QueueLedger, TicketDirectory};

/// Command to place a patient into a doctor's queue.
///
/// Fields arrive raw from the transport layer; the handler validates them
/// into a `QueueKey` before any ledger access.
#[derive(Debug, Clone)]
pub struct EnqueuePatientCommand {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub hospital_id: String,
    pub ticket_id: TicketId,
}

/// Result of a successful enqueue.
#[derive(Debug, Clone)]
pub struct EnqueueResult {
    pub entry: QueueEntry,
}

/// Handler for accepting patients into queues.
pub struct EnqueuePatientHandler {
    ledger: Arc<dyn QueueLedger>,
    allocator: Arc<dyn PositionAllocator>,
    tickets: Arc<dyn TicketDirectory>,
    publisher: Arc<dyn EventPublisher>,
}

impl EnqueuePatientHandler {
    pub fn new(
        ledger: Arc<dyn QueueLedger>,
        allocator: Arc<dyn PositionAllocator>,
        tickets: Arc<dyn TicketDirectory>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            ledger,
            allocator,
            tickets,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: EnqueuePatientCommand,
        metadata: CommandMetadata,
    ) -> Result<EnqueueResult, QueueError> {
        // 1. Structural validation before any ledger access
        let key = QueueKey::parse(cmd.doctor_id, &cmd.appointment_date, &cmd.hospital_id)?;

        // 2. Reserve the position at commit time (atomic per key)
        let position = self.allocator.next_position(&key).await?;

        // 3. Persist the entry; on failure nothing was created and nothing
        //    is broadcast
        let entry = QueueEntry::new(key.clone(), position, cmd.ticket_id);
        self.ledger.create(&entry).await?;

        tracing::info!(
            queue_key = %key,
            position = %position,
            ticket_id = %cmd.ticket_id,
            correlation_id = metadata.correlation_id(),
            "patient queued"
        );

        // 4. Publish events only after the write committed
        let queued = PatientQueued {
            event_id: EventId::new(),
            queue_key: key.clone(),
            position,
            ticket_id: cmd.ticket_id,
            queued_at: entry.created_at(),
        };
        self.publisher
            .publish(
                queued
                    .to_envelope()
                    .with_correlation_id(metadata.correlation_id()),
            )
            .await?;

        // Ticket payload for the patient's own display; a lagging ticket
        // store skips the inline payload but never fails the enqueue
        match self.tickets.find(cmd.ticket_id).await {
            Ok(Some(info)) => {
                let issued = TicketIssued {
                    event_id: EventId::new(),
                    ticket_id: cmd.ticket_id,
                    queue_key: key,
                    position,
                    patient_name: info.patient_name,
                    issued_at: entry.created_at(),
                };
                self.publisher
                    .publish(
                        issued
                            .to_envelope()
                            .with_correlation_id(metadata.correlation_id()),
                    )
                    .await?;
            }
            Ok(None) => {
                tracing::debug!(ticket_id = %cmd.ticket_id, "no ticket data for queued entry");
            }
            Err(e) => {
                tracing::warn!(ticket_id = %cmd.ticket_id, error = %e, "ticket lookup failed");
            }
        }

        Ok(EnqueueResult { entry })
    }
}
