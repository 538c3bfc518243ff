//! Queue HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CallRequest, EnqueueRequest, EnqueueResponse, EntryQuery, ErrorResponse,
    MutationResponse, QueueEntryResponse, QueueKeyQuery, QueueTotalResponse,
};
pub use handlers::QueueHandlers;
pub use routes::queue_routes;
