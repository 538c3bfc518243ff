//! EventSubscriber port - Interface for subscribing to domain events.
//!
//! Handlers register interest in event types without knowing about the
//! underlying transport mechanism.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Implementations should be:
/// - **Idempotent** - safe to call multiple times with the same event
/// - **Quick** - long operations belong in their own tasks
/// - **Isolated** - a handler error never affects other handlers or the
///   publishing caller
///
/// # Example
///
/// ```ignore
/// struct DashboardRefresher { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for DashboardRefresher {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let payload: PatientQueued = event.payload_as()?;
///         // push the update to connected dashboards...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "DashboardRefresher"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events.
///
/// Handlers register interest in specific event types and are invoked for
/// every matching published event.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to multiple event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// Combined trait for event bus implementations.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
