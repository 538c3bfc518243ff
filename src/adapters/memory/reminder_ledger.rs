//! In-memory reminder ledger for testing.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DoctorId, DomainError};
use crate::domain::reminder::FutureAppointmentRef;
use crate::ports::ReminderLedger;

/// In-memory `ReminderLedger`.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned. Acceptable for test
/// code; this adapter should NOT be used in production.
pub struct InMemoryReminderLedger {
    reminders: RwLock<Vec<FutureAppointmentRef>>,
}

impl InMemoryReminderLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            reminders: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryReminderLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReminderLedger for InMemoryReminderLedger {
    async fn create(&self, reminder: &FutureAppointmentRef) -> Result<(), DomainError> {
        self.reminders
            .write()
            .expect("InMemoryReminderLedger: write lock poisoned")
            .push(reminder.clone());
        Ok(())
    }

    async fn find_by_doctor(
        &self,
        doctor_id: DoctorId,
    ) -> Result<Vec<FutureAppointmentRef>, DomainError> {
        let mut found: Vec<FutureAppointmentRef> = self
            .reminders
            .read()
            .expect("InMemoryReminderLedger: lock poisoned")
            .iter()
            .filter(|r| r.doctor_id() == doctor_id)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.appointment_date());
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PatientId;

    fn reminder(doctor_id: i64, date: &str) -> FutureAppointmentRef {
        FutureAppointmentRef::new(
            DoctorId::new(doctor_id).unwrap(),
            PatientId::new(),
            date.parse().unwrap(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn finds_soonest_first() {
        let ledger = InMemoryReminderLedger::new();
        ledger.create(&reminder(5, "2030-06-01")).await.unwrap();
        ledger.create(&reminder(5, "2030-01-15")).await.unwrap();

        let found = ledger
            .find_by_doctor(DoctorId::new(5).unwrap())
            .await
            .unwrap();
        assert_eq!(found[0].appointment_date().to_string(), "2030-01-15");
    }
}
