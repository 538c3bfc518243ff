//! Queue domain - ordered patient flow per doctor, date, and hospital.
//!
//! The core of the service: the `QueueKey` scope, the `QueueEntry`
//! aggregate with its monotonic pending flag, and the events published
//! after successful mutations.

mod entry;
mod errors;
mod events;
mod key;

pub use entry::QueueEntry;
pub use errors::QueueError;
pub use events::{
    EntryCalled, EntryRemoved, PatientQueued, TicketIssued, QUEUE_EVENT_TYPES,
};
pub use key::{Position, QueueKey};
