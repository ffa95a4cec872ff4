//! Shared Diesel error mapping for the booking repositories.
//!
//! Every repository port distinguishes connection failures from query
//! failures; the users and appointments ports additionally report unique
//! violations as conflicts. Callers pass constructors for each case.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}

/// Constructors used to translate Diesel failures for one repository.
pub(crate) struct DieselErrorMap<Q, C, U> {
    pub query: Q,
    pub connection: C,
    pub unique: U,
}

/// Map Diesel errors; unique violations go to `unique`.
pub(crate) fn map_diesel_error<E, Q, C, U>(
    error: DieselError,
    map: DieselErrorMap<Q, C, U>,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
    U: FnOnce() -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => (map.query)("record not found"),
        DieselError::QueryBuilderError(_) => (map.query)("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => (map.unique)(),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (map.connection)("database connection error")
        }
        _ => (map.query)("database error"),
    }
}

/// Map Diesel errors for tables without unique business keys.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    let unique = || query("unique constraint violated");
    map_diesel_error(
        error,
        DieselErrorMap {
            query: &query,
            connection,
            unique,
        },
    )
}
