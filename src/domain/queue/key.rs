//! Queue scope and position value objects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DoctorId, HospitalId, ValidationError};

/// Identifies one queue: one doctor, one calendar date, one hospital.
///
/// All ordering guarantees are scoped to a key: positions are unique and
/// ordered *within* a key, never globally. Immutable once an entry exists;
/// entries are never moved between keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueKey {
    doctor_id: DoctorId,
    appointment_date: NaiveDate,
    hospital_id: HospitalId,
}

impl QueueKey {
    /// Creates a queue key from already-validated parts.
    pub fn new(doctor_id: DoctorId, appointment_date: NaiveDate, hospital_id: HospitalId) -> Self {
        Self {
            doctor_id,
            appointment_date,
            hospital_id,
        }
    }

    /// Creates a queue key from raw request fields, validating each.
    ///
    /// This is the structural precondition check every queue operation runs
    /// before touching the ledger.
    ///
    /// # Errors
    ///
    /// - `NotPositive` if the doctor id is zero or negative
    /// - `EmptyField` if the hospital id is blank
    /// - `InvalidFormat` if the date does not parse as YYYY-MM-DD
    pub fn parse(
        doctor_id: i64,
        appointment_date: &str,
        hospital_id: &str,
    ) -> Result<Self, ValidationError> {
        let doctor_id = DoctorId::new(doctor_id)?;
        let hospital_id = HospitalId::new(hospital_id)?;
        let appointment_date = appointment_date.parse::<NaiveDate>().map_err(|e| {
            ValidationError::invalid_format("appointment_date", e.to_string())
        })?;
        Ok(Self::new(doctor_id, appointment_date, hospital_id))
    }

    /// Returns the doctor this queue belongs to.
    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    /// Returns the calendar date this queue covers.
    pub fn appointment_date(&self) -> NaiveDate {
        self.appointment_date
    }

    /// Returns the hospital site.
    pub fn hospital_id(&self) -> &HospitalId {
        &self.hospital_id
    }
}

impl fmt::Display for QueueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.doctor_id, self.appointment_date, self.hospital_id
        )
    }
}

/// Rank of an entry within its queue; ascending order is the serving order.
///
/// Positions start at 0 and are never reused within a key. Gaps (from
/// deletions or failed inserts after allocation) are expected and harmless:
/// ordering, not contiguity, is the serving contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    /// Creates a position from a raw rank.
    pub fn new(rank: u32) -> Self {
        Self(rank)
    }

    /// The front of a fresh queue.
    pub fn first() -> Self {
        Self(0)
    }

    /// Returns the raw rank.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Position {
    fn from(rank: u32) -> Self {
        Self(rank)
    }
}
