//! Shared translation of port errors into domain errors.
//!
//! Connection failures surface as `service_unavailable`; anything else a
//! backing adapter reports is an internal error whose details stay in logs.

use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{
    AppointmentRepositoryError, CacheError, HashError, MailError, MailTemplateError,
    NotificationRepositoryError, StorageError, UserPersistenceError, UserTokenRepositoryError,
};

pub(crate) const EMAIL_IN_USE: &str = "Email address already used";
pub(crate) const SLOT_TAKEN: &str = "This appointment is already booked";

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::invalid_request(EMAIL_IN_USE),
    }
}

pub(crate) fn map_appointment_error(error: AppointmentRepositoryError) -> Error {
    match error {
        AppointmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("appointment repository unavailable: {message}"))
        }
        AppointmentRepositoryError::Query { message } => {
            Error::internal(format!("appointment repository error: {message}"))
        }
        AppointmentRepositoryError::SlotTaken { .. } => Error::invalid_request(SLOT_TAKEN),
    }
}

pub(crate) fn map_notification_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

pub(crate) fn map_token_error(error: UserTokenRepositoryError) -> Error {
    match error {
        UserTokenRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user token repository unavailable: {message}"))
        }
        UserTokenRepositoryError::Query { message } => {
            Error::internal(format!("user token repository error: {message}"))
        }
    }
}

pub(crate) fn map_hash_error(error: HashError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_mail_error(error: MailError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_template_error(error: MailTemplateError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_storage_error(error: StorageError) -> Error {
    match error {
        StorageError::InvalidName { name } => {
            Error::invalid_request(format!("invalid file name: {name}"))
        }
        StorageError::Io { .. } => Error::internal(error.to_string()),
    }
}

pub(crate) fn map_cache_error(error: CacheError) -> Error {
    match error {
        CacheError::Backend { message } => {
            Error::service_unavailable(format!("cache unavailable: {message}"))
        }
        CacheError::Serialization { .. } => Error::internal(error.to_string()),
    }
}

/// Log a cache failure on a read path where the cache is only an optimisation.
pub(crate) fn log_cache_miss(error: &CacheError, key: &str) {
    warn!(%error, kind = error.kind(), key, "cache unavailable; falling back to repository");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("boom"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::duplicate_email("a@b.io"), ErrorCode::InvalidRequest)]
    fn user_errors_map_to_codes(#[case] error: UserPersistenceError, #[case] code: ErrorCode) {
        assert_eq!(map_user_error(error).code(), code);
    }

    #[rstest]
    #[case(AppointmentRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(AppointmentRepositoryError::query("boom"), ErrorCode::InternalError)]
    #[case(AppointmentRepositoryError::slot_taken("p"), ErrorCode::InvalidRequest)]
    fn appointment_errors_map_to_codes(
        #[case] error: AppointmentRepositoryError,
        #[case] code: ErrorCode,
    ) {
        assert_eq!(map_appointment_error(error).code(), code);
    }

    #[rstest]
    fn slot_taken_uses_duplicate_booking_message() {
        let error = map_appointment_error(AppointmentRepositoryError::slot_taken("p"));
        assert_eq!(error.message(), SLOT_TAKEN);
    }

    #[rstest]
    #[case(CacheError::backend("down"), ErrorCode::ServiceUnavailable)]
    #[case(CacheError::serialization("bad"), ErrorCode::InternalError)]
    fn cache_errors_map_to_codes(#[case] error: CacheError, #[case] code: ErrorCode) {
        assert_eq!(map_cache_error(error).code(), code);
    }
}
