//! Queue domain events.
//!
//! Published after each successful queue mutation:
//! - `PatientQueued` - a patient was accepted into a queue
//! - `TicketIssued` - ticket data for the queued patient's own display
//! - `EntryCalled` - an entry was called forward (marked pending)
//! - `EntryRemoved` - an entry was deleted by staff
//!
//! Events are a best-effort cache-invalidation signal; the ledger remains
//! the source of truth. A subscriber that misses an event re-reads.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, TicketId, Timestamp};

use super::{Position, QueueKey};

/// Every event type the queue module publishes.
///
/// The WebSocket bridge subscribes to exactly this list.
pub const QUEUE_EVENT_TYPES: &[&str] = &[
    "queue.patient_queued",
    "queue.ticket_issued",
    "queue.entry_called",
    "queue.entry_removed",
];

// ════════════════════════════════════════════════════════════════════════════
// PatientQueued
// ════════════════════════════════════════════════════════════════════════════

/// Published when a patient is accepted into a doctor's queue.
///
/// Carries the full enqueue result so doctor dashboards and receptionist
/// consoles can patch their views without an immediate re-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientQueued {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// The queue the patient joined.
    pub queue_key: QueueKey,

    /// Position assigned to the new entry.
    pub position: Position,

    /// Ticket linked to the entry.
    pub ticket_id: TicketId,

    /// When the patient was queued.
    pub queued_at: Timestamp,
}

domain_event!(
    PatientQueued,
    event_type = "queue.patient_queued",
    aggregate_id = queue_key,
    aggregate_type = "QueueEntry",
    occurred_at = queued_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// TicketIssued
// ════════════════════════════════════════════════════════════════════════════

/// Published alongside `PatientQueued` when ticket data resolves.
///
/// The payload is delivered inline so a patient's ticket display can render
/// without a follow-up read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketIssued {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// The ticket that was issued.
    pub ticket_id: TicketId,

    /// The queue the ticket's entry joined.
    pub queue_key: QueueKey,

    /// Position of the ticket's entry.
    pub position: Position,

    /// Patient display name from the ticket subsystem.
    pub patient_name: String,

    /// When the ticket's entry was queued.
    pub issued_at: Timestamp,
}

domain_event!(
    TicketIssued,
    event_type = "queue.ticket_issued",
    aggregate_id = ticket_id,
    aggregate_type = "Ticket",
    occurred_at = issued_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// EntryCalled
// ════════════════════════════════════════════════════════════════════════════

/// Published when staff call an entry forward (pending flips to true).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryCalled {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// The queue the entry belongs to.
    pub queue_key: QueueKey,

    /// Position of the called entry.
    pub position: Position,

    /// When the entry was called.
    pub called_at: Timestamp,
}

domain_event!(
    EntryCalled,
    event_type = "queue.entry_called",
    aggregate_id = queue_key,
    aggregate_type = "QueueEntry",
    occurred_at = called_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// EntryRemoved
// ════════════════════════════════════════════════════════════════════════════

/// Published when staff remove an entry (service finished or patient left).
///
/// Remaining positions are not renumbered; subscribers re-read the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRemoved {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// The queue the entry belonged to.
    pub queue_key: QueueKey,

    /// Position the removed entry held.
    pub position: Position,

    /// When the entry was removed.
    pub removed_at: Timestamp,
}

domain_event!(
    EntryRemoved,
    event_type = "queue.entry_removed",
    aggregate_id = queue_key,
    aggregate_type = "QueueEntry",
    occurred_at = removed_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    fn key() -> QueueKey {
        QueueKey::parse(5, "2024-10-10", "H1").unwrap()
    }

    #[test]
    fn patient_queued_envelope_carries_payload() {
        let event = PatientQueued {
            event_id: EventId::new(),
            queue_key: key(),
            position: Position::new(2),
            ticket_id: TicketId::new(),
            queued_at: Timestamp::now(),
        };

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "queue.patient_queued");
        assert_eq!(envelope.aggregate_id, "5/2024-10-10/H1");
        assert_eq!(envelope.aggregate_type, "QueueEntry");

        let back: PatientQueued = envelope.payload_as().unwrap();
        assert_eq!(back.position, Position::new(2));
    }

    #[test]
    fn ticket_issued_aggregates_on_ticket() {
        let ticket_id = TicketId::new();
        let event = TicketIssued {
            event_id: EventId::new(),
            ticket_id,
            queue_key: key(),
            position: Position::first(),
            patient_name: "A. Patient".to_string(),
            issued_at: Timestamp::now(),
        };
        assert_eq!(event.aggregate_id(), ticket_id.to_string());
        assert_eq!(event.aggregate_type(), "Ticket");
    }

    #[test]
    fn catalogue_covers_all_event_types() {
        for t in QUEUE_EVENT_TYPES {
            assert!(t.starts_with("queue."));
        }
        assert_eq!(QUEUE_EVENT_TYPES.len(), 4);
    }
}
