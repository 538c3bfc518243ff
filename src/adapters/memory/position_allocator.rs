//! In-memory position allocator for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::DomainError;
use crate::domain::queue::{Position, QueueKey};
use crate::ports::PositionAllocator;

/// Mutex-guarded per-key counters.
///
/// The lock serializes allocation per process, which is exactly the
/// guarantee the PostgreSQL adapter gets from its atomic counter upsert.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned. Acceptable for test
/// code; this adapter should NOT be used in production.
pub struct InMemoryPositionAllocator {
    counters: Mutex<HashMap<QueueKey, u32>>,
}

impl InMemoryPositionAllocator {
    /// Creates an allocator with all sequences at zero.
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPositionAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PositionAllocator for InMemoryPositionAllocator {
    async fn next_position(&self, key: &QueueKey) -> Result<Position, DomainError> {
        let mut counters = self
            .counters
            .lock()
            .expect("InMemoryPositionAllocator: lock poisoned");
        let counter = counters.entry(key.clone()).or_insert(0);
        let position = Position::new(*counter);
        *counter += 1;
        Ok(position)
    }
}
