//! Queue entry aggregate.
//!
//! One patient's slot in a doctor's queue for one date/hospital.
//!
//! # Ownership
//!
//! Entries reference tickets by ID but do NOT own them.
//! Tickets are managed by the external ticket subsystem.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TicketId, Timestamp};

use super::{Position, QueueKey};

/// One slot in a queue.
///
/// # Invariants
///
/// - `position` is unique among live entries for the same `key`
/// - `pending` is monotonic: once true, it never reverts (re-queueing a
///   patient means a new entry)
/// - `key` and `position` never change after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// The queue this entry belongs to.
    key: QueueKey,

    /// Rank within the queue; assigned once at creation.
    position: Position,

    /// Non-owning reference to the issued ticket.
    ticket_id: TicketId,

    /// True once the entry has been called forward for service.
    pending: bool,

    /// When the patient was accepted into the queue.
    created_at: Timestamp,
}

impl QueueEntry {
    /// Creates a fresh entry at the given position, not yet called.
    pub fn new(key: QueueKey, position: Position, ticket_id: TicketId) -> Self {
        Self {
            key,
            position,
            ticket_id,
            pending: false,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitutes an entry from persistence (no validation, no events).
    pub fn reconstitute(
        key: QueueKey,
        position: Position,
        ticket_id: TicketId,
        pending: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            key,
            position,
            ticket_id,
            pending,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the queue this entry belongs to.
    pub fn key(&self) -> &QueueKey {
        &self.key
    }

    /// Returns the entry's rank.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the linked ticket id.
    pub fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    /// True once the entry has been called forward.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns when the entry was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────

    /// Marks the entry as called forward. Returns whether anything changed.
    ///
    /// The transition is one-way; calling it again is a no-op.
    pub fn mark_pending(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }
}
