//! Port abstraction for appointment persistence.
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{Appointment, CalendarMonth, NewAppointment, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by appointment repository adapters.
    pub enum AppointmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "appointment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "appointment repository query failed: {message}",
        /// The provider already has an appointment at that time.
        SlotTaken { provider_id: String } => "slot already booked for provider {provider_id}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert a new appointment and return the stored record.
    async fn create(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentRepositoryError>;

    /// Find the provider's appointment at exactly `date`.
    async fn find_by_date(
        &self,
        provider_id: &UserId,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// List the provider's appointments in `month`, in creation order.
    async fn find_all_in_month_from_provider(
        &self,
        provider_id: &UserId,
        month: CalendarMonth,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError>;

    /// List the provider's appointments on `day`, in creation order.
    async fn find_all_in_day_from_provider(
        &self,
        provider_id: &UserId,
        day: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError>;
}
