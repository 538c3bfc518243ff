//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - in-process event bus
//! - `postgres` - production persistence
//! - `memory` - in-memory persistence for tests
//! - `websocket` - real-time fan-out to connected clients
//! - `http` - REST endpoints

pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod websocket;

pub use events::InProcessEventBus;
