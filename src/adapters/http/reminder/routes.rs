//! HTTP routes for reminder endpoints.

use axum::{routing::post, Router};

use super::handlers::{create_reminder, list_reminders, ReminderHandlers};

/// Creates the reminder router with all endpoints.
pub fn reminder_routes(handlers: ReminderHandlers) -> Router {
    Router::new()
        .route("/", post(create_reminder).get(list_reminders))
        .with_state(handlers)
}
