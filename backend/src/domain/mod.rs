//! Domain primitives, aggregates and services.
//!
//! Purpose: define the booking model (users, appointments, availability,
//! notifications, reset tokens) and the services enforcing its rules. Types
//! here know nothing about HTTP or storage; adapters reach them through
//! [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User / UserProfile: account aggregate and its password-free view.
//! - Appointment, CalendarMonth and the availability calculators.
//! - Service types implementing the driving ports.

pub mod appointment;
pub mod auth;
pub mod availability;
pub mod error;
pub mod notification;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_token;

mod appointment_service;
mod authentication_service;
mod password_recovery_service;
mod service_support;
mod user_account_service;

pub use self::appointment::{
    Appointment, AppointmentId, FIRST_SLOT_HOUR, LAST_SLOT_HOUR, NewAppointment,
    accepts_booking_hour, start_of_hour, working_hours,
};
pub use self::appointment_service::{AppointmentCommandService, AppointmentQueryService};
pub use self::auth::{LoginCredentials, LoginValidationError, Password};
pub use self::authentication_service::AuthenticationService;
pub use self::availability::{
    CalendarMonth, CalendarValidationError, DayAvailability, HourAvailability, calendar_day,
    day_availability, day_utc_range, month_availability,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification::{NewNotification, Notification, booking_notification_content};
pub use self::password_recovery_service::PasswordRecoveryService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, USER_NAME_MAX, User, UserId, UserName, UserParts, UserProfile,
    UserValidationError,
};
pub use self::user_account_service::UserAccountService;
pub use self::user_token::{RESET_TOKEN_TTL_HOURS, UserToken};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use booking::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
