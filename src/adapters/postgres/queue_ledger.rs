//! PostgreSQL implementation of QueueLedger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    DoctorId, DomainError, HospitalId, TicketId, Timestamp,
};
use crate::domain::queue::{Position, QueueEntry, QueueKey};
use crate::ports::{EntryFilter, EntryPatch, PositionOrder, QueueLedger};

/// PostgreSQL implementation of QueueLedger.
///
/// The `queue_entries` table carries a unique index on
/// (doctor_id, appointment_date, hospital_id, position) as a database-level
/// backstop for position uniqueness.
#[derive(Clone)]
pub struct PgQueueLedger {
    pool: PgPool,
}

impl PgQueueLedger {
    /// Creates a new PgQueueLedger.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueLedger for PgQueueLedger {
    async fn find(
        &self,
        key: &QueueKey,
        filter: EntryFilter,
        order: PositionOrder,
    ) -> Result<Vec<QueueEntry>, DomainError> {
        let sql = match order {
            PositionOrder::Ascending => {
                r#"
                SELECT doctor_id, appointment_date, hospital_id,
                       position, ticket_id, pending, created_at
                FROM queue_entries
                WHERE doctor_id = $1 AND appointment_date = $2 AND hospital_id = $3
                  AND ($4::bigint IS NULL OR position = $4)
                  AND ($5::boolean IS NULL OR pending = $5)
                ORDER BY position ASC
                "#
            }
            PositionOrder::Descending => {
                r#"
                SELECT doctor_id, appointment_date, hospital_id,
                       position, ticket_id, pending, created_at
                FROM queue_entries
                WHERE doctor_id = $1 AND appointment_date = $2 AND hospital_id = $3
                  AND ($4::bigint IS NULL OR position = $4)
                  AND ($5::boolean IS NULL OR pending = $5)
                ORDER BY position DESC
                "#
            }
        };

        let rows = sqlx::query(sql)
            .bind(key.doctor_id().as_i64())
            .bind(key.appointment_date())
            .bind(key.hospital_id().as_str())
            .bind(filter.position.map(|p| p.as_u32() as i64))
            .bind(filter.pending)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch queue entries: {}", e)))?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn create(&self, entry: &QueueEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO queue_entries (
                doctor_id, appointment_date, hospital_id,
                position, ticket_id, pending, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.key().doctor_id().as_i64())
        .bind(entry.key().appointment_date())
        .bind(entry.key().hospital_id().as_str())
        .bind(entry.position().as_u32() as i64)
        .bind(entry.ticket_id().as_uuid())
        .bind(entry.is_pending())
        .bind(entry.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert queue entry: {}", e)))?;

        Ok(())
    }

    async fn update_matching(
        &self,
        key: &QueueKey,
        filter: EntryFilter,
        patch: EntryPatch,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE queue_entries
            SET pending = pending OR COALESCE($6, FALSE)
            WHERE doctor_id = $1 AND appointment_date = $2 AND hospital_id = $3
              AND ($4::bigint IS NULL OR position = $4)
              AND ($5::boolean IS NULL OR pending = $5)
            "#,
        )
        .bind(key.doctor_id().as_i64())
        .bind(key.appointment_date())
        .bind(key.hospital_id().as_str())
        .bind(filter.position.map(|p| p.as_u32() as i64))
        .bind(filter.pending)
        .bind(patch.pending)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update queue entries: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn delete_matching(
        &self,
        key: &QueueKey,
        filter: EntryFilter,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM queue_entries
            WHERE doctor_id = $1 AND appointment_date = $2 AND hospital_id = $3
              AND ($4::bigint IS NULL OR position = $4)
              AND ($5::boolean IS NULL OR pending = $5)
            "#,
        )
        .bind(key.doctor_id().as_i64())
        .bind(key.appointment_date())
        .bind(key.hospital_id().as_str())
        .bind(filter.position.map(|p| p.as_u32() as i64))
        .bind(filter.pending)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to delete queue entries: {}", e)))?;

        Ok(result.rows_affected())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_entry(row: PgRow) -> Result<QueueEntry, DomainError> {
    let doctor_id: i64 = column(&row, "doctor_id")?;
    let appointment_date: chrono::NaiveDate = column(&row, "appointment_date")?;
    let hospital_id: String = column(&row, "hospital_id")?;
    let position: i64 = column(&row, "position")?;
    let ticket_id: Uuid = column(&row, "ticket_id")?;
    let pending: bool = column(&row, "pending")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;

    let key = QueueKey::new(
        DoctorId::new(doctor_id)
            .map_err(|e| DomainError::database(format!("Corrupt doctor_id in row: {}", e)))?,
        appointment_date,
        HospitalId::new(hospital_id)
            .map_err(|e| DomainError::database(format!("Corrupt hospital_id in row: {}", e)))?,
    );

    Ok(QueueEntry::reconstitute(
        key,
        Position::new(position as u32),
        TicketId::from_uuid(ticket_id),
        pending,
        Timestamp::from_datetime(created_at),
    ))
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to read column '{}': {}", name, e)))
}
