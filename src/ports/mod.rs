//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `QueueLedger` - durable queue store (find / create / update-matching /
//!   delete-matching)
//! - `PositionAllocator` - atomic key-scoped position sequence
//! - `ReminderLedger` - append-only future appointment store
//! - `TicketDirectory` - read-only join into the external ticket subsystem
//!
//! ## Event Ports
//!
//! - `EventPublisher` - publishing domain events
//! - `EventSubscriber` / `EventHandler` - registering interest in events

mod event_publisher;
mod event_subscriber;
mod position_allocator;
mod queue_ledger;
mod reminder_ledger;
mod ticket_directory;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use position_allocator::PositionAllocator;
pub use queue_ledger::{EntryFilter, EntryPatch, PositionOrder, QueueLedger};
pub use reminder_ledger::ReminderLedger;
pub use ticket_directory::{TicketDirectory, TicketInfo};
