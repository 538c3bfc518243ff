//! Event bridge connecting domain events to WebSocket clients.
//!
//! Subscribes to queue domain events and broadcasts them to connected
//! clients in every room the event matches.
//!
//! # Event Flow
//!
//! ```text
//! Domain Event Published
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  QueueEventBridge  │
//! │  receives event    │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │   Transform to     │
//! │    QueueUpdate     │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Resolve scopes    │
//! │  from the payload  │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Broadcast to all  │
//! │  matching rooms    │
//! └────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::domain::queue::{QueueKey, QUEUE_EVENT_TYPES};
use crate::ports::{EventHandler, EventSubscriber};

use super::messages::{QueueUpdate, QueueUpdateType};
use super::rooms::{RoomManager, SubscriptionScope};

/// Bridge between the event bus and WebSocket connections.
///
/// Implements `EventHandler` to receive queue domain events and broadcast
/// them to the rooms they match: the exact queue's room, the doctor's room,
/// and the all-room.
pub struct QueueEventBridge {
    room_manager: Arc<RoomManager>,
}

impl QueueEventBridge {
    /// Create a new event bridge with the given room manager.
    pub fn new(room_manager: Arc<RoomManager>) -> Self {
        Self { room_manager }
    }

    /// Create as an Arc (for sharing with the event subscriber).
    pub fn new_shared(room_manager: Arc<RoomManager>) -> Arc<Self> {
        Arc::new(Self::new(room_manager))
    }

    /// Register this bridge with an event subscriber for every queue event
    /// type.
    pub fn register(self: &Arc<Self>, subscriber: &impl EventSubscriber) {
        subscriber.subscribe_all(QUEUE_EVENT_TYPES, self.clone());
    }

    /// Transform a domain event envelope into a queue update.
    ///
    /// Returns `None` for event types the dashboard protocol does not carry.
    fn transform(&self, event: &EventEnvelope) -> Option<QueueUpdate> {
        let update_type = match event.event_type.as_str() {
            "queue.patient_queued" => QueueUpdateType::PatientQueued,
            "queue.ticket_issued" => QueueUpdateType::TicketIssued,
            "queue.entry_called" | "queue.entry_removed" => QueueUpdateType::QueueChanged,
            _ => return None,
        };

        Some(QueueUpdate {
            update_type,
            data: event.payload.clone(),
            timestamp: event.occurred_at,
            correlation_id: event.metadata.correlation_id.clone(),
        })
    }

    /// Resolve the rooms an event should reach.
    ///
    /// Every queue event payload embeds its `queue_key`; an event whose key
    /// cannot be resolved still reaches the all-room so wallboards stay
    /// live.
    fn resolve_scopes(&self, event: &EventEnvelope) -> Vec<SubscriptionScope> {
        let mut scopes = vec![SubscriptionScope::All];

        if let Some(key_value) = event.payload.get("queue_key") {
            if let Ok(key) = serde_json::from_value::<QueueKey>(key_value.clone()) {
                scopes.push(SubscriptionScope::Doctor(key.doctor_id()));
                scopes.push(SubscriptionScope::Queue(key));
                return scopes;
            }
        }

        tracing::debug!(
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            "no queue key in event payload; broadcasting to all-scope only"
        );
        scopes
    }
}

#[async_trait]
impl EventHandler for QueueEventBridge {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let Some(update) = self.transform(&event) else {
            return Ok(());
        };

        let scopes = self.resolve_scopes(&event);
        let delivered = self.room_manager.broadcast(&scopes, update).await;

        tracing::debug!(
            event_type = %event.event_type,
            delivered,
            "queue update broadcast"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "QueueEventBridge"
    }
}
