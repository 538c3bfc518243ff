//! WebSocket message types for real-time queue updates.
//!
//! Protocol between server and connected clients:
//! - Server → Client: connection status, queue updates, errors, pings
//! - Client → Server: pings, free-form broadcast text

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established and joined to a scope.
    Connected(ConnectedMessage),

    /// Queue update notification.
    #[serde(rename = "queue.update")]
    QueueUpdate(QueueUpdateMessage),

    /// Free-form broadcast (diagnostics/demo channel).
    Message(TextMessage),

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

/// Sent when a client successfully connects and joins a scope room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub scope: String,
    pub client_id: String,
    pub timestamp: String,
}

/// Queue update notification with typed payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueUpdateMessage {
    pub update_type: QueueUpdateType,
    pub data: serde_json::Value,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

/// Types of queue updates that can be sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueUpdateType {
    /// A patient joined a queue; viewers should refresh or patch.
    PatientQueued,
    /// Ticket data for the queued patient's own display, delivered inline.
    TicketIssued,
    /// An entry was called forward or removed; viewers should re-read.
    QueueChanged,
    /// Free-form text relayed between clients.
    Broadcast,
}

/// Free-form text message.
#[derive(Debug, Clone, Serialize)]
pub struct TextMessage {
    pub text: String,
    pub timestamp: String,
}

/// Error message sent to client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Heartbeat request.
    Ping,

    /// Free-form text relayed to every connected client.
    Message { text: String },
}

// ============================================
// Internal Types
// ============================================

/// Internal representation of a queue update for broadcasting.
///
/// This is what the event bridge creates and sends to rooms.
#[derive(Debug, Clone)]
pub struct QueueUpdate {
    pub update_type: QueueUpdateType,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
    pub correlation_id: Option<String>,
}

impl QueueUpdate {
    /// Wraps free-form text as a broadcast update.
    pub fn broadcast_text(text: impl Into<String>) -> Self {
        Self {
            update_type: QueueUpdateType::Broadcast,
            data: serde_json::Value::String(text.into()),
            timestamp: Timestamp::now(),
            correlation_id: None,
        }
    }

    /// Converts to a server message for sending to clients.
    pub fn to_server_message(self) -> ServerMessage {
        match self.update_type {
            QueueUpdateType::Broadcast => ServerMessage::Message(TextMessage {
                text: self
                    .data
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
                timestamp: self.timestamp.to_rfc3339(),
            }),
            _ => ServerMessage::QueueUpdate(QueueUpdateMessage {
                update_type: self.update_type,
                data: self.data,
                timestamp: self.timestamp.to_rfc3339(),
                correlation_id: self.correlation_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn queue_update_serializes_with_type_tag() {
        let update = QueueUpdate {
            update_type: QueueUpdateType::PatientQueued,
            data: json!({"position": 0}),
            timestamp: Timestamp::now(),
            correlation_id: None,
        };
        let json = serde_json::to_value(update.to_server_message()).unwrap();
        assert_eq!(json["type"], "queue.update");
        assert_eq!(json["updateType"], "patient_queued");
    }

    #[test]
    fn broadcast_text_becomes_message_frame() {
        let update = QueueUpdate::broadcast_text("display check");
        let json = serde_json::to_value(update.to_server_message()).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["text"], "display check");
    }

    #[test]
    fn client_message_parses_ping_and_text() {
        let ping: ClientMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(ping, ClientMessage::Ping));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"message","text":"hello"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Message { text } if text == "hello"));
    }
}
