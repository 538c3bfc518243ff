//! PostgreSQL implementation of TicketDirectory.
//!
//! The `tickets` table is owned by the ticket subsystem; this adapter only
//! reads from it for the list-queue join and ticket-issued payloads.

use async_trait::async_trait;
use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, PatientId, TicketId};
use crate::ports::{TicketDirectory, TicketInfo};

/// PostgreSQL implementation of TicketDirectory.
#[derive(Clone)]
pub struct PgTicketDirectory {
    pool: PgPool,
}

impl PgTicketDirectory {
    /// Creates a new PgTicketDirectory.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketDirectory for PgTicketDirectory {
    async fn find(&self, ticket_id: TicketId) -> Result<Option<TicketInfo>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, patient_id, patient_name, patient_contact
            FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(ticket_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch ticket: {}", e)))?;

        row.map(row_to_ticket).transpose()
    }

    async fn find_many(
        &self,
        ticket_ids: &[TicketId],
    ) -> Result<HashMap<TicketId, TicketInfo>, DomainError> {
        if ticket_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<Uuid> = ticket_ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, patient_name, patient_contact
            FROM tickets
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch tickets: {}", e)))?;

        rows.into_iter()
            .map(|row| row_to_ticket(row).map(|t| (t.ticket_id, t)))
            .collect()
    }
}

fn row_to_ticket(row: PgRow) -> Result<TicketInfo, DomainError> {
    let id: Uuid = get(&row, "id")?;
    let patient_id: Uuid = get(&row, "patient_id")?;
    let patient_name: String = get(&row, "patient_name")?;
    let patient_contact: Option<String> = get(&row, "patient_contact")?;

    Ok(TicketInfo {
        ticket_id: TicketId::from_uuid(id),
        patient_id: PatientId::from_uuid(patient_id),
        patient_name,
        patient_contact,
    })
}

fn get<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to read column '{}': {}", name, e)))
}
