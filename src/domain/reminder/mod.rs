//! Future appointment reminders.
//!
//! A `FutureAppointmentRef` is a standalone note that a patient should come
//! back on a later date. It shares the creation pathway with queue entries
//! but has no ordering semantics: created once, never reordered, never part
//! of the live queue.

mod errors;

pub use errors::ReminderError;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DoctorId, PatientId, ReminderId, Timestamp, ValidationError,
};

/// Upper bound on reminder notes; longer notes belong in the patient record.
pub const MAX_NOTES_LENGTH: usize = 1000;

/// Reminder that a patient has a future appointment with a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureAppointmentRef {
    id: ReminderId,
    doctor_id: DoctorId,
    patient_id: PatientId,
    appointment_date: NaiveDate,
    notes: Option<String>,
    created_at: Timestamp,
}

impl FutureAppointmentRef {
    /// Creates a new reminder.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if notes exceed [`MAX_NOTES_LENGTH`]
    pub fn new(
        doctor_id: DoctorId,
        patient_id: PatientId,
        appointment_date: NaiveDate,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        if let Some(notes) = &notes {
            if notes.len() > MAX_NOTES_LENGTH {
                return Err(ValidationError::invalid_format(
                    "notes",
                    format!("exceeds {} characters", MAX_NOTES_LENGTH),
                ));
            }
        }
        Ok(Self {
            id: ReminderId::new(),
            doctor_id,
            patient_id,
            appointment_date,
            notes,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a reminder from persistence.
    pub fn reconstitute(
        id: ReminderId,
        doctor_id: DoctorId,
        patient_id: PatientId,
        appointment_date: NaiveDate,
        notes: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            doctor_id,
            patient_id,
            appointment_date,
            notes,
            created_at,
        }
    }

    pub fn id(&self) -> ReminderId {
        self.id
    }

    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn appointment_date(&self) -> NaiveDate {
        self.appointment_date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
