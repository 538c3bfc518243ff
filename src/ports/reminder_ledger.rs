//! ReminderLedger port - persistence for future appointment references.

use async_trait::async_trait;

use crate::domain::foundation::{DoctorId, DomainError};
use crate::domain::reminder::FutureAppointmentRef;

/// Port for the append-only reminder store.
#[async_trait]
pub trait ReminderLedger: Send + Sync {
    /// Persists a new reminder.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on write failure
    async fn create(&self, reminder: &FutureAppointmentRef) -> Result<(), DomainError>;

    /// Returns a doctor's reminders, soonest appointment date first.
    async fn find_by_doctor(
        &self,
        doctor_id: DoctorId,
    ) -> Result<Vec<FutureAppointmentRef>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_ledger_is_object_safe() {
        fn _accepts_dyn(_ledger: &dyn ReminderLedger) {}
    }
}
