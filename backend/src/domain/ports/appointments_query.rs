//! Driving port for a provider's daily schedule.
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Appointment, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentsQuery: Send + Sync {
    /// Appointments booked with `provider_id` on `day`, in creation order.
    async fn list_provider_appointments(
        &self,
        provider_id: &UserId,
        day: NaiveDate,
    ) -> Result<Vec<Appointment>, Error>;
}
