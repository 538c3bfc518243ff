//! WebSocket room management for scope-based update routing.
//!
//! Subscribers register interest at connect time: everything, one doctor's
//! queues, or one exact queue. The broadcaster delivers each update only to
//! the rooms it matches, so a ticket display for doctor 5 never processes
//! traffic for doctor 6, while a wallboard can still watch the all-scope.
//!
//! # Architecture
//!
//! ```text
//! Room: all          Room: doctor:5      Room: queue:5/2024-10-10/H1
//! ├── wallboard      ├── dashboard-a     ├── ticket-display-1
//! └── ops-console    └── dashboard-b     └── ticket-display-2
//! ```

use std::collections::HashMap;
use std::fmt;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::domain::foundation::DoctorId;
use crate::domain::queue::QueueKey;

use super::messages::QueueUpdate;

/// What a connected client wants to hear about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubscriptionScope {
    /// Every update in the process (wallboards, diagnostics).
    All,
    /// Updates for any queue of one doctor.
    Doctor(DoctorId),
    /// Updates for one exact queue.
    Queue(QueueKey),
}

impl fmt::Display for SubscriptionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionScope::All => write!(f, "all"),
            SubscriptionScope::Doctor(id) => write!(f, "doctor:{}", id),
            SubscriptionScope::Queue(key) => write!(f, "queue:{}", key),
        }
    }
}

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Manages WebSocket connection rooms organized by subscription scope.
///
/// Provides:
/// - Client join/leave operations
/// - Broadcast to every client in a set of scopes
/// - Automatic cleanup of empty rooms
///
/// # Thread Safety
///
/// Uses `RwLock` for the room registry since broadcasts (reads) vastly
/// outnumber joins/leaves (writes).
pub struct RoomManager {
    /// Map of scope → broadcast sender for that room.
    rooms: RwLock<HashMap<SubscriptionScope, broadcast::Sender<QueueUpdate>>>,

    /// Map of client_id → scope for O(1) cleanup on disconnect.
    client_scopes: RwLock<HashMap<ClientId, SubscriptionScope>>,

    /// Channel capacity for each room's broadcast channel.
    channel_capacity: usize,
}

impl RoomManager {
    /// Create a new room manager with the given channel capacity.
    ///
    /// Larger capacities absorb bursts at the cost of memory; 100-256 suits
    /// typical clinic update rates.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            client_scopes: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Create with default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Join a client to a scope room, creating the room if needed.
    ///
    /// Returns a receiver for every update broadcast to that scope.
    pub async fn join(
        &self,
        scope: SubscriptionScope,
        client_id: ClientId,
    ) -> broadcast::Receiver<QueueUpdate> {
        let mut rooms = self.rooms.write().await;

        let sender = rooms.entry(scope.clone()).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });

        self.client_scopes.write().await.insert(client_id, scope);

        sender.subscribe()
    }

    /// Remove a client from its scope room.
    ///
    /// Empty rooms are cleaned up so an abandoned queue key does not leak a
    /// channel.
    pub async fn leave(&self, client_id: &ClientId) {
        let mut client_scopes = self.client_scopes.write().await;

        if let Some(scope) = client_scopes.remove(client_id) {
            let mut rooms = self.rooms.write().await;
            if let Some(sender) = rooms.get(&scope) {
                if sender.receiver_count() == 0 {
                    rooms.remove(&scope);
                }
            }
        }
    }

    /// Broadcast an update to every client in the given scopes.
    ///
    /// Returns the number of receivers the update reached. Rooms with no
    /// subscribers are skipped; delivery to a lagging receiver may drop the
    /// oldest buffered updates, which is acceptable: subscribers re-read
    /// the ledger on any signal.
    pub async fn broadcast(&self, scopes: &[SubscriptionScope], update: QueueUpdate) -> usize {
        let rooms = self.rooms.read().await;
        let mut delivered = 0;
        for scope in scopes {
            if let Some(sender) = rooms.get(scope) {
                delivered += sender.send(update.clone()).unwrap_or(0);
            }
        }
        delivered
    }

    /// Number of clients currently joined to a scope (for tests/monitoring).
    pub async fn subscriber_count(&self, scope: &SubscriptionScope) -> usize {
        self.rooms
            .read()
            .await
            .get(scope)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }
}
