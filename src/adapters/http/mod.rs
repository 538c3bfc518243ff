//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod queue;
pub mod reminder;

pub use queue::{queue_routes, QueueHandlers};
pub use reminder::{reminder_routes, ReminderHandlers};
