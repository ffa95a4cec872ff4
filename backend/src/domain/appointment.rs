//! Appointments booked between a customer and a provider.

use std::fmt;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// First bookable slot of the working day (inclusive).
pub const FIRST_SLOT_HOUR: u32 = 8;
/// Last bookable slot of the working day (inclusive).
pub const LAST_SLOT_HOUR: u32 = 17;

/// Hours offered by every provider, in order.
pub fn working_hours() -> impl Iterator<Item = u32> {
    FIRST_SLOT_HOUR..=LAST_SLOT_HOUR
}

/// Whether an appointment may be created at `hour`.
///
/// Both working-day edges are rejected, so only 09:00 to 16:00 can be booked
/// even though availability lists the 08:00 and 17:00 slots.
///
/// # Examples
/// ```
/// use booking::domain::accepts_booking_hour;
///
/// assert!(!accepts_booking_hour(8));
/// assert!(accepts_booking_hour(9));
/// assert!(accepts_booking_hour(16));
/// assert!(!accepts_booking_hour(17));
/// ```
pub fn accepts_booking_hour(hour: u32) -> bool {
    hour > FIRST_SLOT_HOUR && hour < LAST_SLOT_HOUR
}

/// Truncate `date` to the start of its hour.
pub fn start_of_hour(date: DateTime<Utc>) -> DateTime<Utc> {
    date.date_naive()
        .and_hms_opt(date.hour(), 0, 0)
        .map_or(date, |naive| naive.and_utc())
}

/// Stable appointment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(Uuid);

impl AppointmentId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A booked hour with a provider.
///
/// ## Invariants
/// - `date` is aligned to the start of an hour.
/// - At most one appointment exists per `(provider_id, date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub provider_id: UserId,
    /// The customer who booked the slot.
    pub user_id: UserId,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Calendar day the appointment falls on.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Hour of day the appointment starts at.
    pub fn hour(&self) -> u32 {
        self.date.hour()
    }
}

/// Input for persisting a new appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub provider_id: UserId,
    pub user_id: UserId,
    pub date: DateTime<Utc>,
}
