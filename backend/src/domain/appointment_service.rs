//! Appointment booking and schedule services.
//!
//! [`AppointmentCommandService`] owns the booking rules. All checks run
//! before anything is written, so a rejected request leaves no appointment,
//! notification or cache change behind.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Timelike};
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    AppointmentRepository, AppointmentsCommand, AppointmentsQuery, AvailabilityQuery, CacheKey,
    CacheProvider, CreateAppointmentRequest, NotificationRepository, recover_json, save_json,
};
use crate::domain::service_support::{
    SLOT_TAKEN, log_cache_miss, map_appointment_error, map_cache_error, map_notification_error,
};
use crate::domain::{
    Appointment, CalendarMonth, DayAvailability, Error, HourAvailability, NewAppointment,
    NewNotification, UserId, accepts_booking_hour, booking_notification_content,
    day_availability, month_availability, start_of_hour,
};

pub(crate) const PAST_DATE: &str = "You can't create an appointment on a past date";
pub(crate) const SELF_BOOKING: &str = "You can't create an appointment with yourself";
pub(crate) const OUTSIDE_HOURS: &str = "You can only create appointments between 8am and 5pm";

/// Books appointments and keeps the provider's cached schedule fresh.
#[derive(Clone)]
pub struct AppointmentCommandService<A, N, C> {
    appointments: Arc<A>,
    notifications: Arc<N>,
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<A, N, C> AppointmentCommandService<A, N, C> {
    pub fn new(
        appointments: Arc<A>,
        notifications: Arc<N>,
        cache: Arc<C>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointments,
            notifications,
            cache,
            clock,
        }
    }
}

#[async_trait]
impl<A, N, C> AppointmentsCommand for AppointmentCommandService<A, N, C>
where
    A: AppointmentRepository,
    N: NotificationRepository,
    C: CacheProvider,
{
    async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, Error> {
        let CreateAppointmentRequest {
            user_id,
            provider_id,
            date,
        } = request;
        let date = start_of_hour(date);

        if date < self.clock.utc() {
            return Err(Error::invalid_request(PAST_DATE));
        }
        if user_id == provider_id {
            return Err(Error::invalid_request(SELF_BOOKING));
        }
        if !accepts_booking_hour(date.hour()) {
            return Err(Error::invalid_request(OUTSIDE_HOURS));
        }

        let existing = self
            .appointments
            .find_by_date(&provider_id, date)
            .await
            .map_err(map_appointment_error)?;
        if existing.is_some() {
            return Err(Error::invalid_request(SLOT_TAKEN));
        }

        let appointment = self
            .appointments
            .create(NewAppointment {
                provider_id: provider_id.clone(),
                user_id,
                date,
            })
            .await
            .map_err(map_appointment_error)?;

        self.notifications
            .create(NewNotification {
                recipient_id: provider_id.clone(),
                content: booking_notification_content(date),
            })
            .await
            .map_err(map_notification_error)?;

        let month = CalendarMonth::of(date.date_naive());
        self.cache
            .invalidate_prefix(&CacheKey::provider_appointments_in_month(
                &provider_id,
                month,
            ))
            .await
            .map_err(map_cache_error)?;

        info!(
            appointment_id = %appointment.id,
            provider_id = %provider_id,
            date = %date,
            "appointment booked"
        );
        Ok(appointment)
    }
}

/// Read-side service for schedules and availability.
#[derive(Clone)]
pub struct AppointmentQueryService<A, C> {
    appointments: Arc<A>,
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<A, C> AppointmentQueryService<A, C> {
    pub fn new(appointments: Arc<A>, cache: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            appointments,
            cache,
            clock,
        }
    }
}

#[async_trait]
impl<A, C> AppointmentsQuery for AppointmentQueryService<A, C>
where
    A: AppointmentRepository,
    C: CacheProvider,
{
    async fn list_provider_appointments(
        &self,
        provider_id: &UserId,
        day: NaiveDate,
    ) -> Result<Vec<Appointment>, Error> {
        let key = CacheKey::provider_appointments(provider_id, day);
        match recover_json::<_, Vec<Appointment>>(self.cache.as_ref(), &key).await {
            Ok(Some(cached)) => {
                debug!(key = %key, "provider appointments served from cache");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(error) => log_cache_miss(&error, key.as_str()),
        }

        let appointments = self
            .appointments
            .find_all_in_day_from_provider(provider_id, day)
            .await
            .map_err(map_appointment_error)?;

        if let Err(error) = save_json(self.cache.as_ref(), &key, &appointments).await {
            log_cache_miss(&error, key.as_str());
        }
        Ok(appointments)
    }
}

#[async_trait]
impl<A, C> AvailabilityQuery for AppointmentQueryService<A, C>
where
    A: AppointmentRepository,
    C: CacheProvider,
{
    async fn day_availability(
        &self,
        provider_id: &UserId,
        day: NaiveDate,
    ) -> Result<Vec<HourAvailability>, Error> {
        let appointments = self
            .appointments
            .find_all_in_day_from_provider(provider_id, day)
            .await
            .map_err(map_appointment_error)?;
        Ok(day_availability(day, &appointments, self.clock.utc()))
    }

    async fn month_availability(
        &self,
        provider_id: &UserId,
        month: CalendarMonth,
    ) -> Result<Vec<DayAvailability>, Error> {
        let appointments = self
            .appointments
            .find_all_in_month_from_provider(provider_id, month)
            .await
            .map_err(map_appointment_error)?;
        Ok(month_availability(month, &appointments))
    }
}

#[cfg(test)]
#[path = "appointment_service_tests.rs"]
mod tests;
