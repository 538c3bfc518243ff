//! TicketDirectory port - read-only lookup into the ticket subsystem.
//!
//! Tickets are owned by an external subsystem; queue entries hold a
//! non-owning `TicketId`. The directory resolves those ids to display data
//! when listing a queue and when publishing ticket-issued payloads.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, PatientId, TicketId};

/// Display data for an issued ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketInfo {
    pub ticket_id: TicketId,
    pub patient_id: PatientId,
    pub patient_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_contact: Option<String>,
}

/// Read-only port to the ticket subsystem.
#[async_trait]
pub trait TicketDirectory: Send + Sync {
    /// Resolves a single ticket. Returns `None` when the directory has no
    /// record for the id (a lagging ticket store is not an error).
    async fn find(&self, ticket_id: TicketId) -> Result<Option<TicketInfo>, DomainError>;

    /// Resolves a batch of tickets for the list-queue join. Ids with no
    /// record are simply absent from the result map.
    async fn find_many(
        &self,
        ticket_ids: &[TicketId],
    ) -> Result<HashMap<TicketId, TicketInfo>, DomainError>;
}
