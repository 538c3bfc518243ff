//! Clinic Queue server entry point.
//!
//! Wires the adapters together: PostgreSQL persistence, the in-process
//! event bus, the WebSocket room registry with its event bridge, and the
//! HTTP router.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use clinic_queue::adapters::http::{queue_routes, reminder_routes, QueueHandlers, ReminderHandlers};
use clinic_queue::adapters::postgres::{
    PgPositionAllocator, PgQueueLedger, PgReminderLedger, PgTicketDirectory,
};
use clinic_queue::adapters::websocket::{
    ws_handler, QueueEventBridge, RoomManager, WebSocketState,
};
use clinic_queue::adapters::InProcessEventBus;
use clinic_queue::application::handlers::queue::{
    CurrentPositionHandler, EnqueuePatientHandler, ListQueueHandler, MarkPendingHandler,
    QueueTotalHandler, RemoveEntryHandler,
};
use clinic_queue::application::handlers::reminder::{
    CreateReminderHandler, ListRemindersHandler,
};
use clinic_queue::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "starting clinic-queue"
    );

    // Persistence
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let ledger = Arc::new(PgQueueLedger::new(pool.clone()));
    let allocator = Arc::new(PgPositionAllocator::new(pool.clone()));
    let tickets = Arc::new(PgTicketDirectory::new(pool.clone()));
    let reminders = Arc::new(PgReminderLedger::new(pool));

    // Event bus and WebSocket fan-out
    let bus = Arc::new(InProcessEventBus::new());
    let room_manager = Arc::new(RoomManager::new(config.realtime.channel_capacity));
    let bridge = QueueEventBridge::new_shared(room_manager.clone());
    bridge.register(bus.as_ref());

    // Application handlers
    let queue_handlers = QueueHandlers::new(
        Arc::new(EnqueuePatientHandler::new(
            ledger.clone(),
            allocator,
            tickets.clone(),
            bus.clone(),
        )),
        Arc::new(ListQueueHandler::new(ledger.clone(), tickets)),
        Arc::new(CurrentPositionHandler::new(ledger.clone())),
        Arc::new(QueueTotalHandler::new(ledger.clone())),
        Arc::new(RemoveEntryHandler::new(ledger.clone(), bus.clone())),
        Arc::new(MarkPendingHandler::new(ledger, bus)),
    );
    let reminder_handlers = ReminderHandlers::new(
        Arc::new(CreateReminderHandler::new(reminders.clone())),
        Arc::new(ListRemindersHandler::new(reminders)),
    );

    // Router
    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins: Vec<http::HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any)
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api/queue", queue_routes(queue_handlers))
        .nest("/api/reminders", reminder_routes(reminder_handlers))
        .route(
            "/api/live",
            get(ws_handler).with_state(WebSocketState::new(room_manager)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
