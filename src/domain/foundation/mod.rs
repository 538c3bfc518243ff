//! Foundation types shared across the domain layer.
//!
//! Value objects, identifiers, error machinery, and the event
//! infrastructure every domain module builds on.

mod command;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata,
    SerializableDomainEvent,
};
pub use ids::{DoctorId, HospitalId, PatientId, ReminderId, TicketId};
pub use timestamp::Timestamp;
