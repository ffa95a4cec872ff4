//! PostgreSQL-backed `AppointmentRepository` implementation using Diesel ORM.
//!
//! The `appointments_provider_date_key` unique index backs the one booking
//! per provider and hour rule; a violation surfaces as `SlotTaken`.

use std::ops::Range;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{AppointmentRepository, AppointmentRepositoryError};
use crate::domain::{
    Appointment, AppointmentId, CalendarMonth, NewAppointment, UserId, day_utc_range,
};

use super::diesel_error_mapping::{DieselErrorMap, map_diesel_error, map_pool_error};
use super::models::{AppointmentRow, NewAppointmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::appointments;

/// Diesel-backed implementation of the appointment repository port.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselAppointmentRepository {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    async fn load_between(
        &self,
        provider_id: &UserId,
        range: Range<DateTime<Utc>>,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<AppointmentRow> = appointments::table
            .filter(appointments::provider_id.eq(provider_id.as_uuid()))
            .filter(appointments::date.ge(range.start))
            .filter(appointments::date.lt(range.end))
            .order((appointments::created_at.asc(), appointments::id.asc()))
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(err, provider_id))?;
        Ok(rows.into_iter().map(row_to_appointment).collect())
    }
}

fn pool_error(error: PoolError) -> AppointmentRepositoryError {
    map_pool_error(error, AppointmentRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error, provider_id: &UserId) -> AppointmentRepositoryError {
    map_diesel_error(
        error,
        DieselErrorMap {
            query: AppointmentRepositoryError::query,
            connection: AppointmentRepositoryError::connection,
            unique: || AppointmentRepositoryError::slot_taken(provider_id.to_string()),
        },
    )
}

fn row_to_appointment(row: AppointmentRow) -> Appointment {
    Appointment {
        id: AppointmentId::from_uuid(row.id),
        provider_id: UserId::from_uuid(row.provider_id),
        user_id: UserId::from_uuid(row.user_id),
        date: row.date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn create(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let now = self.clock.utc();
        let row = NewAppointmentRow {
            id: Uuid::new_v4(),
            provider_id: *appointment.provider_id.as_uuid(),
            user_id: *appointment.user_id.as_uuid(),
            date: appointment.date,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(appointments::table)
            .values(&row)
            .returning(AppointmentRow::as_returning())
            .get_result::<AppointmentRow>(&mut conn)
            .await
            .map(row_to_appointment)
            .map_err(|err| diesel_error(err, &appointment.provider_id))
    }

    async fn find_by_date(
        &self,
        provider_id: &UserId,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        appointments::table
            .filter(appointments::provider_id.eq(provider_id.as_uuid()))
            .filter(appointments::date.eq(date))
            .select(AppointmentRow::as_select())
            .first::<AppointmentRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_appointment))
            .map_err(|err| diesel_error(err, provider_id))
    }

    async fn find_all_in_month_from_provider(
        &self,
        provider_id: &UserId,
        month: CalendarMonth,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        self.load_between(provider_id, month.utc_range()).await
    }

    async fn find_all_in_day_from_provider(
        &self,
        provider_id: &UserId,
        day: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        self.load_between(provider_id, day_utc_range(day)).await
    }
}
