//! HTTP DTOs for reminder endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::reminder::FutureAppointmentRef;

/// Request to record a future appointment reference.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReminderRequest {
    pub doctor_id: i64,
    pub patient_id: Uuid,
    pub appointment_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query parameters for listing a doctor's reminders.
#[derive(Debug, Clone, Deserialize)]
pub struct ListRemindersParams {
    pub doctor_id: i64,
}

/// A recorded reminder.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderResponse {
    pub id: String,
    pub doctor_id: i64,
    pub patient_id: String,
    pub appointment_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<FutureAppointmentRef> for ReminderResponse {
    fn from(reminder: FutureAppointmentRef) -> Self {
        Self {
            id: reminder.id().to_string(),
            doctor_id: reminder.doctor_id().as_i64(),
            patient_id: reminder.patient_id().to_string(),
            appointment_date: reminder.appointment_date().to_string(),
            notes: reminder.notes().map(str::to_string),
            created_at: reminder.created_at().to_rfc3339(),
        }
    }
}
