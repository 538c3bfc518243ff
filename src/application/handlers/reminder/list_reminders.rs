//! ListRemindersHandler - Query handler for a doctor's reminders.

use std::sync::Arc;

use crate::domain::foundation::DoctorId;
use crate::domain::reminder::{FutureAppointmentRef, ReminderError};
use crate::ports::ReminderLedger;

/// Query for every reminder recorded for one doctor.
#[derive(Debug, Clone)]
pub struct ListRemindersQuery {
    pub doctor_id: i64,
}

/// Returns a doctor's reminders, soonest appointment first.
pub struct ListRemindersHandler {
    ledger: Arc<dyn ReminderLedger>,
}

impl ListRemindersHandler {
    pub fn new(ledger: Arc<dyn ReminderLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(
        &self,
        query: ListRemindersQuery,
    ) -> Result<Vec<FutureAppointmentRef>, ReminderError> {
        let doctor_id = DoctorId::new(query.doctor_id)?;
        Ok(self.ledger.find_by_doctor(doctor_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::foundation::{DomainError, PatientId};

    struct FixedLedger(Vec<FutureAppointmentRef>);

    #[async_trait]
    impl ReminderLedger for FixedLedger {
        async fn create(&self, _reminder: &FutureAppointmentRef) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_doctor(
            &self,
            doctor_id: DoctorId,
        ) -> Result<Vec<FutureAppointmentRef>, DomainError> {
            Ok(self
                .0
                .iter()
                .filter(|r| r.doctor_id() == doctor_id)
                .cloned()
                .collect())
        }
    }

    fn reminder(doctor_id: i64) -> FutureAppointmentRef {
        FutureAppointmentRef::new(
            DoctorId::new(doctor_id).unwrap(),
            PatientId::new(),
            "2030-01-15".parse().unwrap(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_only_the_requested_doctor() {
        let h = ListRemindersHandler::new(Arc::new(FixedLedger(vec![
            reminder(5),
            reminder(6),
            reminder(5),
        ])));

        let found = h.handle(ListRemindersQuery { doctor_id: 5 }).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn rejects_invalid_doctor_id() {
        let h = ListRemindersHandler::new(Arc::new(FixedLedger(vec![])));
        assert!(h.handle(ListRemindersQuery { doctor_id: -2 }).await.is_err());
    }
}
