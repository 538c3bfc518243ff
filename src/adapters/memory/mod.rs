//! In-memory port implementations for testing.
//!
//! Deterministic, dependency-free stand-ins for the PostgreSQL adapters.
//! Unit tests inside handlers use their own mocks; these exist for the
//! end-to-end tests under `tests/` that wire the whole service together.

mod position_allocator;
mod queue_ledger;
mod reminder_ledger;
mod ticket_directory;

pub use position_allocator::InMemoryPositionAllocator;
pub use queue_ledger::InMemoryQueueLedger;
pub use reminder_ledger::InMemoryReminderLedger;
pub use ticket_directory::InMemoryTicketDirectory;
