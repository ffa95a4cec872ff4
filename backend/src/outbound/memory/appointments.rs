//! In-memory `AppointmentRepository`.

use std::ops::Range;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;

use crate::domain::ports::{AppointmentRepository, AppointmentRepositoryError};
use crate::domain::{
    Appointment, AppointmentId, CalendarMonth, NewAppointment, UserId, day_utc_range,
};

use super::lock_store;

pub struct InMemoryAppointmentRepository {
    appointments: Mutex<Vec<Appointment>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryAppointmentRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            appointments: Mutex::new(Vec::new()),
            clock,
        }
    }

    fn between(
        &self,
        provider_id: &UserId,
        range: Range<DateTime<Utc>>,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let appointments = lock_store(&self.appointments, AppointmentRepositoryError::query)?;
        Ok(appointments
            .iter()
            .filter(|a| &a.provider_id == provider_id && range.contains(&a.date))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn create(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentRepositoryError> {
        let mut appointments = lock_store(&self.appointments, AppointmentRepositoryError::query)?;
        if appointments
            .iter()
            .any(|a| a.provider_id == appointment.provider_id && a.date == appointment.date)
        {
            return Err(AppointmentRepositoryError::slot_taken(
                appointment.provider_id.to_string(),
            ));
        }
        let now = self.clock.utc();
        let stored = Appointment {
            id: AppointmentId::random(),
            provider_id: appointment.provider_id,
            user_id: appointment.user_id,
            date: appointment.date,
            created_at: now,
            updated_at: now,
        };
        appointments.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_date(
        &self,
        provider_id: &UserId,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let appointments = lock_store(&self.appointments, AppointmentRepositoryError::query)?;
        Ok(appointments
            .iter()
            .find(|a| &a.provider_id == provider_id && a.date == date)
            .cloned())
    }

    async fn find_all_in_month_from_provider(
        &self,
        provider_id: &UserId,
        month: CalendarMonth,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        self.between(provider_id, month.utc_range())
    }

    async fn find_all_in_day_from_provider(
        &self,
        provider_id: &UserId,
        day: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        self.between(provider_id, day_utc_range(day))
    }
}
