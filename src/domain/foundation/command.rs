//! Command infrastructure for CQRS handlers.
//!
//! Instead of each handler accepting `correlation_id: Option<String>,
//! requested_by: Option<String>` separately, they accept a single
//! `CommandMetadata` struct, which keeps handler signatures stable as
//! metadata fields are added.

use serde::{Deserialize, Serialize};

/// Metadata context for command handlers.
///
/// Carries correlation context through the command processing pipeline and
/// onto emitted events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Links related operations across a single client request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Who initiated the command (receptionist console, patient kiosk, ...).
    /// Informational only; authorization is out of scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
}

impl CommandMetadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the correlation id.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Sets the initiator marker.
    pub fn with_requested_by(mut self, who: impl Into<String>) -> Self {
        self.requested_by = Some(who.into());
        self
    }

    /// Returns the correlation id, or "unknown" when absent.
    pub fn correlation_id(&self) -> &str {
        self.correlation_id.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_id_defaults_to_unknown() {
        assert_eq!(CommandMetadata::new().correlation_id(), "unknown");
    }

    #[test]
    fn builder_sets_fields() {
        let meta = CommandMetadata::new()
            .with_correlation_id("req-42")
            .with_requested_by("reception-desk-1");
        assert_eq!(meta.correlation_id(), "req-42");
        assert_eq!(meta.requested_by.as_deref(), Some("reception-desk-1"));
    }
}
