//! Driving port for booking appointments.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Appointment, Error, UserId};

/// Request to book `date` with `provider_id` on behalf of `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAppointmentRequest {
    pub user_id: UserId,
    pub provider_id: UserId,
    pub date: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentsCommand: Send + Sync {
    /// Validate and book an appointment, notifying the provider.
    async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, Error>;
}
