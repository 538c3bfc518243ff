//! HTTP routes for queue endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    current_position, enqueue, list_queue, mark_pending, queue_total, remove_entry,
    QueueHandlers,
};

/// Creates the queue router with all endpoints.
pub fn queue_routes(handlers: QueueHandlers) -> Router {
    Router::new()
        .route("/", post(enqueue).get(list_queue).delete(remove_entry))
        .route("/position", get(current_position))
        .route("/total", get(queue_total))
        .route("/call", post(mark_pending))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_routes_compiles() {
        // Route definitions are validated at construction; HTTP behavior
        // is covered by the integration tests
    }
}
