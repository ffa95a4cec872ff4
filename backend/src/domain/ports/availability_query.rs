//! Driving port for provider availability projections.
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{CalendarMonth, DayAvailability, Error, HourAvailability, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityQuery: Send + Sync {
    /// Availability of each working hour on `day`.
    async fn day_availability(
        &self,
        provider_id: &UserId,
        day: NaiveDate,
    ) -> Result<Vec<HourAvailability>, Error>;

    /// Availability of each calendar day in `month`.
    async fn month_availability(
        &self,
        provider_id: &UserId,
        month: CalendarMonth,
    ) -> Result<Vec<DayAvailability>, Error>;
}
