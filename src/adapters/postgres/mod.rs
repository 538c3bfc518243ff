//! PostgreSQL adapters - the production persistence implementations.

mod position_allocator;
mod queue_ledger;
mod reminder_ledger;
mod ticket_directory;

pub use position_allocator::PgPositionAllocator;
pub use queue_ledger::PgQueueLedger;
pub use reminder_ledger::PgReminderLedger;
pub use ticket_directory::PgTicketDirectory;
