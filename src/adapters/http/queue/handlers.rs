//! HTTP handlers for queue endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::queue::{
    CurrentPositionHandler, CurrentPositionQuery, EnqueuePatientCommand, EnqueuePatientHandler,
    ListQueueHandler, ListQueueQuery, MarkPendingCommand, MarkPendingHandler, QueueTotalHandler,
    QueueTotalQuery, RemoveEntryCommand, RemoveEntryHandler,
};
use crate::domain::foundation::{CommandMetadata, TicketId};
use crate::domain::queue::QueueError;

use super::dto::{
    CallRequest, CurrentPositionResponse, EnqueueRequest, EnqueueResponse, EntryQuery,
    ErrorResponse, MutationResponse, QueueEntryResponse, QueueKeyQuery, QueueTotalResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct QueueHandlers {
    enqueue_handler: Arc<EnqueuePatientHandler>,
    list_handler: Arc<ListQueueHandler>,
    position_handler: Arc<CurrentPositionHandler>,
    total_handler: Arc<QueueTotalHandler>,
    remove_handler: Arc<RemoveEntryHandler>,
    call_handler: Arc<MarkPendingHandler>,
}

impl QueueHandlers {
    pub fn new(
        enqueue_handler: Arc<EnqueuePatientHandler>,
        list_handler: Arc<ListQueueHandler>,
        position_handler: Arc<CurrentPositionHandler>,
        total_handler: Arc<QueueTotalHandler>,
        remove_handler: Arc<RemoveEntryHandler>,
        call_handler: Arc<MarkPendingHandler>,
    ) -> Self {
        Self {
            enqueue_handler,
            list_handler,
            position_handler,
            total_handler,
            remove_handler,
            call_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/queue - Place a patient into a queue
pub async fn enqueue(
    State(handlers): State<QueueHandlers>,
    Json(req): Json<EnqueueRequest>,
) -> Response {
    let cmd = EnqueuePatientCommand {
        doctor_id: req.doctor_id,
        appointment_date: req.appointment_date,
        hospital_id: req.hospital_id,
        ticket_id: TicketId::from_uuid(req.ticket_id),
    };

    let metadata = CommandMetadata::new().with_correlation_id("http-request");

    match handlers.enqueue_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = EnqueueResponse {
                position: result.entry.position().as_u32(),
                ticket_id: result.entry.ticket_id().to_string(),
                pending: result.entry.is_pending(),
                created_at: result.entry.created_at().to_rfc3339(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_queue_error(e),
    }
}

/// GET /api/queue - List a queue in serving order
pub async fn list_queue(
    State(handlers): State<QueueHandlers>,
    Query(params): Query<QueueKeyQuery>,
) -> Response {
    let query = ListQueueQuery {
        doctor_id: params.doctor_id,
        appointment_date: params.appointment_date,
        hospital_id: params.hospital_id,
    };

    match handlers.list_handler.handle(query).await {
        Ok(views) => {
            let response: Vec<QueueEntryResponse> =
                views.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_queue_error(e),
    }
}

/// GET /api/queue/position - Smallest waiting position
pub async fn current_position(
    State(handlers): State<QueueHandlers>,
    Query(params): Query<QueueKeyQuery>,
) -> Response {
    let query = CurrentPositionQuery {
        doctor_id: params.doctor_id,
        appointment_date: params.appointment_date,
        hospital_id: params.hospital_id,
    };

    match handlers.position_handler.handle(query).await {
        Ok(position) => {
            let response = CurrentPositionResponse {
                position: position.map(|p| p.as_u32()),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_queue_error(e),
    }
}

/// GET /api/queue/total - Entry count for a queue
pub async fn queue_total(
    State(handlers): State<QueueHandlers>,
    Query(params): Query<QueueKeyQuery>,
) -> Response {
    let query = QueueTotalQuery {
        doctor_id: params.doctor_id,
        appointment_date: params.appointment_date,
        hospital_id: params.hospital_id,
    };

    match handlers.total_handler.handle(query).await {
        Ok(total) => (StatusCode::OK, Json(QueueTotalResponse { total })).into_response(),
        Err(e) => handle_queue_error(e),
    }
}

/// DELETE /api/queue - Remove the entry at a position
pub async fn remove_entry(
    State(handlers): State<QueueHandlers>,
    Query(params): Query<EntryQuery>,
) -> Response {
    let cmd = RemoveEntryCommand {
        doctor_id: params.doctor_id,
        appointment_date: params.appointment_date,
        hospital_id: params.hospital_id,
        position: params.position,
    };

    let metadata = CommandMetadata::new().with_correlation_id("http-request");

    match handlers.remove_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = MutationResponse {
                affected: result.removed,
                message: if result.removed {
                    "Entry removed".to_string()
                } else {
                    "No matching entry".to_string()
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_queue_error(e),
    }
}

/// POST /api/queue/call - Call the entry at a position forward
pub async fn mark_pending(
    State(handlers): State<QueueHandlers>,
    Json(req): Json<CallRequest>,
) -> Response {
    let cmd = MarkPendingCommand {
        doctor_id: req.doctor_id,
        appointment_date: req.appointment_date,
        hospital_id: req.hospital_id,
        position: req.position,
    };

    let metadata = CommandMetadata::new().with_correlation_id("http-request");

    match handlers.call_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = MutationResponse {
                affected: result.called,
                message: if result.called {
                    "Entry called forward".to_string()
                } else {
                    "No matching entry".to_string()
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_queue_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_queue_error(error: QueueError) -> Response {
    let status = match &error {
        QueueError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        QueueError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = ErrorResponse::new(error.code().to_string(), error.message());
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_422() {
        let response = handle_queue_error(QueueError::validation("doctor_id", "must be positive"));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn infrastructure_errors_map_to_500() {
        let response = handle_queue_error(QueueError::infrastructure("pool exhausted"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
