//! CreateReminderHandler - Command handler for future appointment references.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DoctorId, PatientId, ValidationError};
use crate::domain::reminder::{FutureAppointmentRef, ReminderError};
use crate::ports::ReminderLedger;

/// Command to record a future appointment reference.
///
/// Reminders share the creation pathway with queue entries but carry no
/// ordering semantics: no position is allocated and no queue event is
/// broadcast.
#[derive(Debug, Clone)]
pub struct CreateReminderCommand {
    pub doctor_id: i64,
    pub patient_id: PatientId,
    pub appointment_date: String,
    pub notes: Option<String>,
}

/// Handler for append-only reminder creation.
pub struct CreateReminderHandler {
    ledger: Arc<dyn ReminderLedger>,
}

impl CreateReminderHandler {
    pub fn new(ledger: Arc<dyn ReminderLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(
        &self,
        cmd: CreateReminderCommand,
        metadata: CommandMetadata,
    ) -> Result<FutureAppointmentRef, ReminderError> {
        let doctor_id = DoctorId::new(cmd.doctor_id)?;
        let appointment_date = cmd.appointment_date.parse().map_err(
            |e: chrono::ParseError| {
                ValidationError::invalid_format("appointment_date", e.to_string())
            },
        )?;

        let reminder =
            FutureAppointmentRef::new(doctor_id, cmd.patient_id, appointment_date, cmd.notes)?;

        self.ledger.create(&reminder).await?;

        tracing::info!(
            reminder_id = %reminder.id(),
            doctor_id = %doctor_id,
            correlation_id = metadata.correlation_id(),
            "future appointment reference created"
        );

        Ok(reminder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::foundation::DomainError;

    struct MockReminderLedger {
        saved: Mutex<Vec<FutureAppointmentRef>>,
        fail: bool,
    }

    impl MockReminderLedger {
        fn new() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn saved(&self) -> Vec<FutureAppointmentRef> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReminderLedger for MockReminderLedger {
        async fn create(&self, reminder: &FutureAppointmentRef) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::database("Simulated save failure"));
            }
            self.saved.lock().unwrap().push(reminder.clone());
            Ok(())
        }

        async fn find_by_doctor(
            &self,
            doctor_id: DoctorId,
        ) -> Result<Vec<FutureAppointmentRef>, DomainError> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.doctor_id() == doctor_id)
                .cloned()
                .collect())
        }
    }

    fn cmd() -> CreateReminderCommand {
        CreateReminderCommand {
            doctor_id: 5,
            patient_id: PatientId::new(),
            appointment_date: "2030-01-15".to_string(),
            notes: Some("Bring previous scans".to_string()),
        }
    }

    #[tokio::test]
    async fn creates_reminder_with_valid_input() {
        let ledger = Arc::new(MockReminderLedger::new());
        let h = CreateReminderHandler::new(ledger.clone());

        let reminder = h.handle(cmd(), CommandMetadata::new()).await.unwrap();

        assert_eq!(reminder.notes(), Some("Bring previous scans"));
        assert_eq!(ledger.saved().len(), 1);
    }

    #[tokio::test]
    async fn rejects_invalid_doctor_id() {
        let ledger = Arc::new(MockReminderLedger::new());
        let h = CreateReminderHandler::new(ledger.clone());

        let mut bad = cmd();
        bad.doctor_id = 0;
        let result = h.handle(bad, CommandMetadata::new()).await;

        assert!(matches!(result, Err(ReminderError::ValidationFailed { .. })));
        assert!(ledger.saved().is_empty());
    }

    #[tokio::test]
    async fn rejects_malformed_date() {
        let h = CreateReminderHandler::new(Arc::new(MockReminderLedger::new()));

        let mut bad = cmd();
        bad.appointment_date = "next week".to_string();
        assert!(h.handle(bad, CommandMetadata::new()).await.is_err());
    }

    #[tokio::test]
    async fn surfaces_ledger_failure() {
        let h = CreateReminderHandler::new(Arc::new(MockReminderLedger::failing()));
        let result = h.handle(cmd(), CommandMetadata::new()).await;
        assert!(matches!(result, Err(ReminderError::Infrastructure(_))));
    }
}
