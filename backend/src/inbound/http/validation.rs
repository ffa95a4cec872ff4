//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected field becomes an `invalid_request` error whose details name
//! the JSON field and a machine-readable code, e.g.
//! `{"field": "providerId", "value": "x", "code": "invalid_uuid"}`.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::domain::{CalendarMonth, Error, UserId, calendar_day};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    InvalidDate,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidDate => "invalid_date",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

/// Unwrap a required field or report it missing.
pub(crate) fn required<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Report a value a domain constructor rejected, quoting its reason.
pub(crate) fn invalid_field_error(field: FieldName, reason: impl Display) -> Error {
    ValidationError::new(field, reason.to_string()).with_code(ErrorCode::InvalidValue)
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    let name = field.as_str();
    UserId::new(value).map_err(|_| {
        ValidationError::new(field, format!("{name} must be a valid UUID"))
            .with_value(ErrorCode::InvalidUuid, value)
    })
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    let name = field.as_str();
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            ValidationError::new(field, format!("{name} must be an RFC 3339 timestamp"))
                .with_value(ErrorCode::InvalidTimestamp, value)
        })
}

const CALENDAR_FIELD: FieldName = FieldName::new("date");

/// Validate `day`/`month`/`year` query components.
pub(crate) fn parse_calendar_day(year: i32, month: u32, day: u32) -> Result<NaiveDate, Error> {
    calendar_day(year, month, day).map_err(|err| {
        ValidationError::new(CALENDAR_FIELD, err.to_string())
            .with_value(ErrorCode::InvalidDate, format!("{year}-{month}-{day}"))
    })
}

/// Validate `month`/`year` query components.
pub(crate) fn parse_calendar_month(year: i32, month: u32) -> Result<CalendarMonth, Error> {
    CalendarMonth::new(year, month).map_err(|err| {
        ValidationError::new(CALENDAR_FIELD, err.to_string())
            .with_value(ErrorCode::InvalidDate, format!("{year}-{month}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    const PROVIDER: FieldName = FieldName::new("providerId");

    fn details(error: &Error) -> &serde_json::Value {
        error.details().expect("details present")
    }

    #[rstest]
    fn missing_fields_name_the_field() {
        let error = required::<String>(None, PROVIDER).expect_err("missing");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(
            details(&error),
            &json!({"field": "providerId", "code": "missing_field"})
        );
    }

    #[rstest]
    fn malformed_uuids_echo_the_value() {
        let error = parse_user_id("abc", PROVIDER).expect_err("invalid");
        assert_eq!(error.message(), "providerId must be a valid UUID");
        assert_eq!(details(&error)["value"], "abc");
        assert_eq!(details(&error)["code"], "invalid_uuid");
    }

    #[rstest]
    #[case("2020-05-20T14:00:00Z", 14)]
    #[case("2020-05-20T11:00:00-03:00", 14)]
    fn timestamps_are_normalised_to_utc(#[case] raw: &str, #[case] hour: u32) {
        use chrono::Timelike;
        let parsed = parse_rfc3339_timestamp(raw, FieldName::new("date")).expect("valid");
        assert_eq!(parsed.hour(), hour);
    }

    #[rstest]
    #[case("2020-05-20 14:00")]
    #[case("tomorrow")]
    fn non_rfc3339_timestamps_are_rejected(#[case] raw: &str) {
        let error = parse_rfc3339_timestamp(raw, FieldName::new("date")).expect_err("invalid");
        assert_eq!(details(&error)["code"], "invalid_timestamp");
    }

    #[rstest]
    #[case(2020, 2, 30)]
    #[case(2020, 13, 1)]
    #[case(2020, 0, 1)]
    fn impossible_days_are_rejected(#[case] year: i32, #[case] month: u32, #[case] day: u32) {
        let error = parse_calendar_day(year, month, day).expect_err("invalid");
        assert_eq!(details(&error)["code"], "invalid_date");
    }

    #[rstest]
    fn months_outside_the_calendar_are_rejected() {
        assert!(parse_calendar_month(2020, 13).is_err());
        assert_eq!(
            parse_calendar_month(2020, 5).expect("valid").month(),
            5
        );
    }
}
