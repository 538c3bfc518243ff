//! PostgreSQL implementation of PositionAllocator.
//!
//! Positions come from a per-key counter row in `queue_positions`, advanced
//! with a single atomic upsert. Two concurrent allocations for the same key
//! serialize on the row lock and receive distinct positions; allocations
//! for different keys touch different rows and never contend.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::queue::{Position, QueueKey};
use crate::ports::PositionAllocator;

/// PostgreSQL implementation of PositionAllocator.
#[derive(Clone)]
pub struct PgPositionAllocator {
    pool: PgPool,
}

impl PgPositionAllocator {
    /// Creates a new PgPositionAllocator.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PositionAllocator for PgPositionAllocator {
    async fn next_position(&self, key: &QueueKey) -> Result<Position, DomainError> {
        // The counter stores how many positions have been handed out; the
        // returned position is the pre-increment value, so sequences start
        // at 0.
        let (position,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO queue_positions (doctor_id, appointment_date, hospital_id, next_position)
            VALUES ($1, $2, $3, 1)
            ON CONFLICT (doctor_id, appointment_date, hospital_id)
            DO UPDATE SET next_position = queue_positions.next_position + 1
            RETURNING next_position - 1
            "#,
        )
        .bind(key.doctor_id().as_i64())
        .bind(key.appointment_date())
        .bind(key.hospital_id().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to allocate position: {}", e)))?;

        Ok(Position::new(position as u32))
    }
}
