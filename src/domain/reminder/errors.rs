//! Reminder-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by reminder operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// Structurally invalid request fields.
    ValidationFailed { field: String, message: String },
    /// Store unavailable or a write failed.
    Infrastructure(String),
}

impl ReminderError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReminderError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReminderError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReminderError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ReminderError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ReminderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReminderError {}

impl From<ValidationError> for ReminderError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::NotPositive { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        ReminderError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ReminderError {
    fn from(err: DomainError) -> Self {
        ReminderError::Infrastructure(err.message)
    }
}
