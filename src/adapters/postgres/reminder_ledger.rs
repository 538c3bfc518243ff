//! PostgreSQL implementation of ReminderLedger.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DoctorId, DomainError, PatientId, ReminderId, Timestamp};
use crate::domain::reminder::FutureAppointmentRef;
use crate::ports::ReminderLedger;

/// PostgreSQL implementation of ReminderLedger.
#[derive(Clone)]
pub struct PgReminderLedger {
    pool: PgPool,
}

impl PgReminderLedger {
    /// Creates a new PgReminderLedger.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderLedger for PgReminderLedger {
    async fn create(&self, reminder: &FutureAppointmentRef) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO future_appointments (
                id, doctor_id, patient_id, appointment_date, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(reminder.id().as_uuid())
        .bind(reminder.doctor_id().as_i64())
        .bind(reminder.patient_id().as_uuid())
        .bind(reminder.appointment_date())
        .bind(reminder.notes())
        .bind(reminder.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert reminder: {}", e)))?;

        Ok(())
    }

    async fn find_by_doctor(
        &self,
        doctor_id: DoctorId,
    ) -> Result<Vec<FutureAppointmentRef>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, doctor_id, patient_id, appointment_date, notes, created_at
            FROM future_appointments
            WHERE doctor_id = $1
            ORDER BY appointment_date ASC
            "#,
        )
        .bind(doctor_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch reminders: {}", e)))?;

        rows.into_iter().map(row_to_reminder).collect()
    }
}

fn row_to_reminder(row: PgRow) -> Result<FutureAppointmentRef, DomainError> {
    let id: Uuid = get(&row, "id")?;
    let doctor_id: i64 = get(&row, "doctor_id")?;
    let patient_id: Uuid = get(&row, "patient_id")?;
    let appointment_date: NaiveDate = get(&row, "appointment_date")?;
    let notes: Option<String> = get(&row, "notes")?;
    let created_at: DateTime<Utc> = get(&row, "created_at")?;

    Ok(FutureAppointmentRef::reconstitute(
        ReminderId::from_uuid(id),
        DoctorId::new(doctor_id)
            .map_err(|e| DomainError::database(format!("Corrupt doctor_id in row: {}", e)))?,
        PatientId::from_uuid(patient_id),
        appointment_date,
        notes,
        Timestamp::from_datetime(created_at),
    ))
}

fn get<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to read column '{}': {}", name, e)))
}
