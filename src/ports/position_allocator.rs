//! PositionAllocator port - commit-time position assignment.
//!
//! The allocator guarantees that no two concurrent inserts for the same
//! `QueueKey` receive the same position. The next position must come from an
//! atomic key-scoped sequence advanced at the moment of allocation, never
//! from a read-then-write "count + 1" observed at request time, which races
//! under concurrency.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::queue::{Position, QueueKey};

/// Port for assigning the next position within a queue.
///
/// Implementations must ensure:
/// - Two concurrent calls for the same key never return the same position
/// - Positions for a key are strictly increasing
/// - Allocation failure leaves no state behind (the caller creates no entry)
///
/// A position allocated for an insert that subsequently fails is burned,
/// leaving a gap in the sequence; ordering, not contiguity, is the serving
/// contract, so gaps are harmless.
#[async_trait]
pub trait PositionAllocator: Send + Sync {
    /// Reserves the next position for the key.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the sequence store is unavailable
    async fn next_position(&self, key: &QueueKey) -> Result<Position, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_allocator_is_object_safe() {
        fn _accepts_dyn(_allocator: &dyn PositionAllocator) {}
    }
}
