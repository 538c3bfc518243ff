//! EventPublisher port - Interface for publishing domain events.
//!
//! This port defines how the domain publishes events without knowing about
//! the underlying transport. Publication is a best-effort fan-out signal:
//! the ledger remains the source of truth, and a subscriber that misses an
//! event recovers by re-reading.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Delivery is fire-and-forget: no acknowledgment, no retry, no
///   persistence of missed events
/// - Subscriber failures are isolated from the publishing caller
/// - Errors returned here mean the event could not be handed to the
///   transport at all, not that a subscriber failed
///
/// # Example
///
/// ```ignore
/// let envelope = event.to_envelope().with_correlation_id("req-42");
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event to all current subscribers.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order, best-effort.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
