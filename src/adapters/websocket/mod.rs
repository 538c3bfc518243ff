//! WebSocket adapter - real-time fan-out of queue updates.
//!
//! Clients connect once, register a subscription scope, and receive queue
//! updates pushed from the event bridge until they disconnect.

mod event_bridge;
mod handler;
mod messages;
mod rooms;

pub use event_bridge::QueueEventBridge;
pub use handler::{ws_handler, LiveQuery, WebSocketState};
pub use messages::{
    ClientMessage, ConnectedMessage, QueueUpdate, QueueUpdateMessage, QueueUpdateType,
    ServerMessage,
};
pub use rooms::{ClientId, RoomManager, SubscriptionScope};
