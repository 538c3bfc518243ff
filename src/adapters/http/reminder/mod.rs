//! Reminder HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateReminderRequest, ListRemindersParams, ReminderResponse};
pub use handlers::ReminderHandlers;
pub use routes::reminder_routes;
