//! Day and month availability for a provider.
//!
//! Both projections are pure functions over the provider's appointments so
//! they can be tested without any repository.

use std::collections::HashSet;
use std::ops::Range;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;

use super::{Appointment, working_hours};

/// Validation errors for calendar selectors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarValidationError {
    #[error("{year}-{month} is not a valid month")]
    InvalidMonth { year: i32, month: u32 },
    #[error("{year}-{month}-{day} is not a valid date")]
    InvalidDay { year: i32, month: u32, day: u32 },
}

/// A calendar month in a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// Validate a `month` in 1..=12 for `year`.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarValidationError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or(CalendarValidationError::InvalidMonth { year, month })
    }

    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Every calendar day of the month, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|first| {
                first
                    .iter_days()
                    .take_while(|day| day.month() == self.month)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Half-open UTC range covering the whole month.
    pub fn utc_range(&self) -> Range<DateTime<Utc>> {
        let Some(first) = NaiveDate::from_ymd_opt(self.year, self.month, 1) else {
            return DateTime::<Utc>::MIN_UTC..DateTime::<Utc>::MIN_UTC;
        };
        let next = first
            .checked_add_months(Months::new(1))
            .map_or(DateTime::<Utc>::MAX_UTC, midnight_utc);
        midnight_utc(first)..next
    }
}

fn midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Half-open UTC range covering `day`.
///
/// The last representable day ends at [`DateTime::<Utc>::MAX_UTC`].
pub fn day_utc_range(day: NaiveDate) -> Range<DateTime<Utc>> {
    let start = midnight_utc(day);
    let end = start
        .checked_add_signed(TimeDelta::days(1))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    start..end
}

/// Validate a calendar day from its components.
pub fn calendar_day(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarValidationError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(CalendarValidationError::InvalidDay { year, month, day })
}

/// Availability of a single working-hour slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourAvailability {
    pub hour: u32,
    pub available: bool,
}

/// Availability of a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayAvailability {
    pub day: u32,
    pub available: bool,
}

/// Hour-by-hour availability for `day`.
///
/// A slot is unavailable when it is already booked or its start is not
/// strictly after `now`.
pub fn day_availability(
    day: NaiveDate,
    appointments: &[Appointment],
    now: DateTime<Utc>,
) -> Vec<HourAvailability> {
    let booked: HashSet<u32> = appointments
        .iter()
        .filter(|appointment| appointment.day() == day)
        .map(Appointment::hour)
        .collect();

    working_hours()
        .map(|hour| {
            let in_future = day
                .and_hms_opt(hour, 0, 0)
                .is_some_and(|start| start.and_utc() > now);
            HourAvailability {
                hour,
                available: in_future && !booked.contains(&hour),
            }
        })
        .collect()
}

/// Day-by-day availability for `month`.
///
/// A day is unavailable only when every working-hour slot is booked.
pub fn month_availability(
    month: CalendarMonth,
    appointments: &[Appointment],
) -> Vec<DayAvailability> {
    let slots_per_day = working_hours().count();
    month
        .days()
        .into_iter()
        .map(|day| {
            let booked: HashSet<u32> = appointments
                .iter()
                .filter(|appointment| appointment.day() == day)
                .map(Appointment::hour)
                .filter(|hour| working_hours().any(|slot| slot == *hour))
                .collect();
            DayAvailability {
                day: day.day(),
                available: booked.len() < slots_per_day,
            }
        })
        .collect()
}
