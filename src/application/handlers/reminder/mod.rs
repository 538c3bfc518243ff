//! Reminder command and query handlers.

mod create_reminder;
mod list_reminders;

pub use create_reminder::{CreateReminderCommand, CreateReminderHandler};
pub use list_reminders::{ListRemindersHandler, ListRemindersQuery};
