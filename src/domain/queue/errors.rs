//! Queue-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by queue operations.
///
/// Missing entries are deliberately NOT represented here: `remove_entry` and
/// `mark_pending` treat a non-matching position as a successful no-op, which
/// keeps staff UIs safe under double-click and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Structurally invalid request fields, rejected before any ledger
    /// access.
    ValidationFailed { field: String, message: String },
    /// Ledger unavailable or a write failed; no partial entry remains.
    Infrastructure(String),
}

impl QueueError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        QueueError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        QueueError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            QueueError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            QueueError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            QueueError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            QueueError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for QueueError {}

impl From<ValidationError> for QueueError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::NotPositive { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        QueueError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for QueueError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::NotPositive
            | ErrorCode::InvalidFormat => QueueError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "request".to_string()),
                message: err.message,
            },
            _ => QueueError::Infrastructure(err.message),
        }
    }
}
