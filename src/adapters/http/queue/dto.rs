//! HTTP DTOs for queue endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::handlers::queue::QueueEntryView;
use crate::ports::TicketInfo;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to place a patient into a queue.
#[derive(Debug, Clone, Deserialize)]
pub struct EnqueueRequest {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub hospital_id: String,
    pub ticket_id: Uuid,
}

/// Queue key via query parameters (list/position/total reads).
#[derive(Debug, Clone, Deserialize)]
pub struct QueueKeyQuery {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub hospital_id: String,
}

/// Queue key plus position via query parameters (remove).
#[derive(Debug, Clone, Deserialize)]
pub struct EntryQuery {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub hospital_id: String,
    pub position: u32,
}

/// Request to call the entry at a position forward.
#[derive(Debug, Clone, Deserialize)]
pub struct CallRequest {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub hospital_id: String,
    pub position: u32,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a successful enqueue.
#[derive(Debug, Clone, Serialize)]
pub struct EnqueueResponse {
    pub position: u32,
    pub ticket_id: String,
    pub pending: bool,
    pub created_at: String,
}

/// One queue entry with joined ticket data.
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntryResponse {
    pub position: u32,
    pub ticket_id: String,
    pub pending: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<TicketResponse>,
}

/// Joined ticket display data.
#[derive(Debug, Clone, Serialize)]
pub struct TicketResponse {
    pub patient_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_contact: Option<String>,
}

impl From<TicketInfo> for TicketResponse {
    fn from(info: TicketInfo) -> Self {
        Self {
            patient_name: info.patient_name,
            patient_contact: info.patient_contact,
        }
    }
}

impl From<QueueEntryView> for QueueEntryResponse {
    fn from(view: QueueEntryView) -> Self {
        Self {
            position: view.position.as_u32(),
            ticket_id: view.ticket_id.to_string(),
            pending: view.pending,
            created_at: view.created_at.to_rfc3339(),
            ticket: view.ticket.map(Into::into),
        }
    }
}

/// Response for the current serving position.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentPositionResponse {
    pub position: Option<u32>,
}

/// Response for the queue total.
#[derive(Debug, Clone, Serialize)]
pub struct QueueTotalResponse {
    pub total: u64,
}

/// Response for remove/call mutations.
///
/// `affected` is false for idempotent no-ops (nothing matched).
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    pub affected: bool,
    pub message: String,
}

/// Flat error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
