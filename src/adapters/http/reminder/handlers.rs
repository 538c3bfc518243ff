//! HTTP handlers for reminder endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::reminder::{
    CreateReminderCommand, CreateReminderHandler, ListRemindersHandler, ListRemindersQuery,
};
use crate::domain::foundation::{CommandMetadata, PatientId};
use crate::domain::reminder::ReminderError;

use super::super::queue::ErrorResponse;
use super::dto::{CreateReminderRequest, ListRemindersParams, ReminderResponse};

#[derive(Clone)]
pub struct ReminderHandlers {
    create_handler: Arc<CreateReminderHandler>,
    list_handler: Arc<ListRemindersHandler>,
}

impl ReminderHandlers {
    pub fn new(
        create_handler: Arc<CreateReminderHandler>,
        list_handler: Arc<ListRemindersHandler>,
    ) -> Self {
        Self {
            create_handler,
            list_handler,
        }
    }
}

/// POST /api/reminders - Record a future appointment reference
pub async fn create_reminder(
    State(handlers): State<ReminderHandlers>,
    Json(req): Json<CreateReminderRequest>,
) -> Response {
    let cmd = CreateReminderCommand {
        doctor_id: req.doctor_id,
        patient_id: PatientId::from_uuid(req.patient_id),
        appointment_date: req.appointment_date,
        notes: req.notes,
    };

    let metadata = CommandMetadata::new().with_correlation_id("http-request");

    match handlers.create_handler.handle(cmd, metadata).await {
        Ok(reminder) => {
            let response: ReminderResponse = reminder.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_reminder_error(e),
    }
}

/// GET /api/reminders - List a doctor's reminders
pub async fn list_reminders(
    State(handlers): State<ReminderHandlers>,
    Query(params): Query<ListRemindersParams>,
) -> Response {
    let query = ListRemindersQuery {
        doctor_id: params.doctor_id,
    };

    match handlers.list_handler.handle(query).await {
        Ok(reminders) => {
            let response: Vec<ReminderResponse> =
                reminders.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_reminder_error(e),
    }
}

fn handle_reminder_error(error: ReminderError) -> Response {
    let status = match &error {
        ReminderError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ReminderError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = ErrorResponse::new(error.code().to_string(), error.message());
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_422() {
        let response = handle_reminder_error(ReminderError::ValidationFailed {
            field: "doctor_id".to_string(),
            message: "must be positive".to_string(),
        });
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
