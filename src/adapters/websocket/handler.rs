//! WebSocket upgrade handler for real-time queue connections.
//!
//! Handles the HTTP → WebSocket upgrade and the connection lifecycle:
//! 1. Resolve the subscription scope from query parameters
//! 2. Upgrade to WebSocket
//! 3. Join the scope room
//! 4. Pump messages until disconnect
//! 5. Clean up room membership
//!
//! Disconnecting changes no queue state; the connection is purely a
//! transport concern.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::{broadcast, mpsc};

use crate::domain::foundation::{DoctorId, Timestamp};
use crate::domain::queue::QueueKey;

use super::{
    messages::{
        ClientMessage, ConnectedMessage, ErrorMessage, PongMessage, QueueUpdate, ServerMessage,
    },
    rooms::{ClientId, RoomManager, SubscriptionScope},
};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Room manager for scope-based routing.
    pub room_manager: Arc<RoomManager>,
}

impl WebSocketState {
    /// Create a new WebSocket state.
    pub fn new(room_manager: Arc<RoomManager>) -> Self {
        Self { room_manager }
    }
}

/// Scope selection via query parameters.
///
/// - no parameters → subscribe to everything
/// - `doctor_id` → one doctor's queues
/// - `doctor_id` + `appointment_date` + `hospital_id` → one exact queue
#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    pub doctor_id: Option<i64>,
    pub appointment_date: Option<String>,
    pub hospital_id: Option<String>,
}

impl LiveQuery {
    fn scope(&self) -> Result<SubscriptionScope, String> {
        match (&self.doctor_id, &self.appointment_date, &self.hospital_id) {
            (None, None, None) => Ok(SubscriptionScope::All),
            (Some(doctor_id), None, None) => {
                let doctor_id = DoctorId::new(*doctor_id).map_err(|e| e.to_string())?;
                Ok(SubscriptionScope::Doctor(doctor_id))
            }
            (Some(doctor_id), Some(date), Some(hospital_id)) => {
                let key = QueueKey::parse(*doctor_id, date, hospital_id)
                    .map_err(|e| e.to_string())?;
                Ok(SubscriptionScope::Queue(key))
            }
            _ => Err(
                "specify nothing, doctor_id alone, or doctor_id + appointment_date + hospital_id"
                    .to_string(),
            ),
        }
    }
}

/// Handle WebSocket upgrade requests for live queue updates.
///
/// Route: `GET /api/live`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<LiveQuery>,
    State(state): State<WebSocketState>,
) -> Response {
    let scope = match query.scope() {
        Ok(scope) => scope,
        Err(reason) => {
            return Response::builder()
                .status(400)
                .body(reason.into())
                .unwrap();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, scope, state))
}

/// Handle an established WebSocket connection.
///
/// The socket sink lives in the send task; room broadcasts and direct
/// frames (pongs) both funnel through it.
async fn handle_socket(socket: WebSocket, scope: SubscriptionScope, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let client_id = ClientId::new();

    let mut room_rx: broadcast::Receiver<QueueUpdate> = state
        .room_manager
        .join(scope.clone(), client_id.clone())
        .await;

    // Direct server→client frames that bypass the rooms (pong replies)
    let (direct_tx, mut direct_rx) = mpsc::channel::<ServerMessage>(8);

    let connected = ServerMessage::Connected(ConnectedMessage {
        scope: scope.to_string(),
        client_id: client_id.to_string(),
        timestamp: Timestamp::now().to_rfc3339(),
    });

    if let Err(e) = send_message(&mut sender, &connected).await {
        tracing::debug!("Failed to send connected message: {}", e);
        state.room_manager.leave(&client_id).await;
        return; // Client disconnected immediately
    }

    tracing::debug!(client_id = %client_id, scope = %scope, "websocket client connected");

    // Forward room broadcasts and direct frames to the client
    let mut send_task = {
        let client_id = client_id.clone();
        tokio::spawn(async move {
            loop {
                let message = tokio::select! {
                    update = room_rx.recv() => match update {
                        Ok(update) => update.to_server_message(),
                        // A lagged receiver dropped old updates; the client
                        // falls back to reads, so keep the connection alive
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(client_id = %client_id, skipped, "client lagged");
                            continue;
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    direct = direct_rx.recv() => match direct {
                        Some(message) => message,
                        None => break,
                    },
                };

                if let Err(e) = send_message(&mut sender, &message).await {
                    tracing::debug!(
                        client_id = %client_id,
                        "Send error, closing connection: {}",
                        e
                    );
                    break;
                }
            }
        })
    };

    // Handle incoming messages from the client
    let room_manager = state.room_manager.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(ClientMessage::Ping) => {
                            let pong = ServerMessage::Pong(PongMessage {
                                timestamp: Timestamp::now().to_rfc3339(),
                            });
                            if direct_tx.send(pong).await.is_err() {
                                break;
                            }
                        }
                        Ok(ClientMessage::Message { text }) => {
                            // Free-form diagnostics channel: relay to every
                            // client watching the all-scope
                            room_manager
                                .broadcast(
                                    &[SubscriptionScope::All],
                                    QueueUpdate::broadcast_text(text),
                                )
                                .await;
                        }
                        Err(e) => {
                            tracing::debug!("Unparseable client message: {}", e);
                            let error = ServerMessage::Error(ErrorMessage {
                                code: "BAD_MESSAGE".to_string(),
                                message: "Message could not be parsed".to_string(),
                                timestamp: Timestamp::now().to_rfc3339(),
                            });
                            if direct_tx.send(error).await.is_err() {
                                break;
                            }
                        }
                    }
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {} // Binary/ping/pong frames handled by axum
                Err(e) => {
                    tracing::debug!("WebSocket receive error: {}", e);
                    break;
                }
            }
        }
    });

    // Whichever task finishes first tears the connection down
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.room_manager.leave(&client_id).await;
    tracing::debug!(client_id = %client_id, "websocket client disconnected");
}

async fn send_message(
    sender: &mut (impl SinkExt<Message> + Unpin),
    message: &ServerMessage,
) -> Result<(), String> {
    let json = serde_json::to_string(message).map_err(|e| e.to_string())?;
    sender
        .send(Message::Text(json))
        .await
        .map_err(|_| "send failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_subscribes_to_all() {
        let q = LiveQuery {
            doctor_id: None,
            appointment_date: None,
            hospital_id: None,
        };
        assert_eq!(q.scope().unwrap(), SubscriptionScope::All);
    }

    #[test]
    fn doctor_only_query_subscribes_to_doctor() {
        let q = LiveQuery {
            doctor_id: Some(5),
            appointment_date: None,
            hospital_id: None,
        };
        assert!(matches!(q.scope().unwrap(), SubscriptionScope::Doctor(_)));
    }

    #[test]
    fn full_key_query_subscribes_to_queue() {
        let q = LiveQuery {
            doctor_id: Some(5),
            appointment_date: Some("2024-10-10".to_string()),
            hospital_id: Some("H1".to_string()),
        };
        assert!(matches!(q.scope().unwrap(), SubscriptionScope::Queue(_)));
    }

    #[test]
    fn partial_key_is_rejected() {
        let q = LiveQuery {
            doctor_id: Some(5),
            appointment_date: Some("2024-10-10".to_string()),
            hospital_id: None,
        };
        assert!(q.scope().is_err());
    }

    #[test]
    fn invalid_doctor_id_is_rejected() {
        let q = LiveQuery {
            doctor_id: Some(-1),
            appointment_date: None,
            hospital_id: None,
        };
        assert!(q.scope().is_err());
    }
}
