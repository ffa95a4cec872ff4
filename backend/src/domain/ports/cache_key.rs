//! Cache keys and the namespaces the booking services cache under.
//!
//! Keys are colon-separated segments. Prefix invalidation removes every key
//! whose segments start with the prefix's segments, so each namespace builder
//! below keeps the more general part of the key first.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::domain::{CalendarMonth, UserId};

const PROVIDER_APPOINTMENTS: &str = "provider-appointments";
const PROVIDERS_LIST: &str = "providers-list";

/// Key (or key prefix) identifying a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Construct a key after validating that it is non-empty, contains no
    /// whitespace and no glob characters.
    pub fn new(value: impl Into<String>) -> Result<Self, CacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CacheKeyValidationError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(CacheKeyValidationError::ContainsWhitespace);
        }
        if raw.contains(['*', '?', '[', ']']) {
            return Err(CacheKeyValidationError::ContainsPattern);
        }
        Ok(Self(raw))
    }

    /// Appointments booked with `provider` on `day`.
    ///
    /// # Examples
    /// ```
    /// use booking::domain::UserId;
    /// use booking::domain::ports::CacheKey;
    /// use chrono::NaiveDate;
    ///
    /// let provider = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
    /// let day = NaiveDate::from_ymd_opt(2020, 5, 20).unwrap();
    /// assert_eq!(
    ///     CacheKey::provider_appointments(&provider, day).as_str(),
    ///     "provider-appointments:3fa85f64-5717-4562-b3fc-2c963f66afa6:2020-5:20"
    /// );
    /// ```
    pub fn provider_appointments(provider: &UserId, day: NaiveDate) -> Self {
        let month = Self::provider_appointments_in_month(provider, CalendarMonth::of(day));
        Self(format!("{}:{}", month.0, day.day()))
    }

    /// Prefix covering every day of `month` for `provider`.
    pub fn provider_appointments_in_month(provider: &UserId, month: CalendarMonth) -> Self {
        Self(format!(
            "{PROVIDER_APPOINTMENTS}:{provider}:{}-{}",
            month.year(),
            month.month()
        ))
    }

    /// Providers list as seen by `user`.
    pub fn providers_list(user: &UserId) -> Self {
        Self(format!("{PROVIDERS_LIST}:{user}"))
    }

    /// Prefix covering every cached providers list.
    pub fn all_providers_lists() -> Self {
        Self(PROVIDERS_LIST.to_owned())
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether this key falls under `prefix`.
    pub fn has_prefix(&self, prefix: &CacheKey) -> bool {
        self.0
            .strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.starts_with(':'))
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`CacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheKeyValidationError {
    #[error("cache key must not be empty")]
    Empty,
    #[error("cache key must not contain whitespace")]
    ContainsWhitespace,
    #[error("cache key must not contain glob characters")]
    ContainsPattern,
}

#[cfg(test)]
mod tests {
    //! Validates cache key parsing and namespace layout.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", CacheKeyValidationError::Empty)]
    #[case("   ", CacheKeyValidationError::Empty)]
    #[case(" leading", CacheKeyValidationError::ContainsWhitespace)]
    #[case("in side", CacheKeyValidationError::ContainsWhitespace)]
    #[case("users:*", CacheKeyValidationError::ContainsPattern)]
    fn cache_key_rejects_invalid_input(
        #[case] value: &str,
        #[case] expected: CacheKeyValidationError,
    ) {
        assert_eq!(CacheKey::new(value), Err(expected));
    }

    #[rstest]
    fn day_key_falls_under_month_prefix() {
        let provider = UserId::random();
        let day = NaiveDate::from_ymd_opt(2020, 5, 20).expect("valid day");
        let month = CalendarMonth::of(day);

        let key = CacheKey::provider_appointments(&provider, day);
        let prefix = CacheKey::provider_appointments_in_month(&provider, month);

        assert!(key.has_prefix(&prefix));
    }

    #[rstest]
    fn prefix_match_respects_segment_boundaries() {
        let provider = UserId::random();
        let october = CalendarMonth::new(2020, 10).expect("valid month");
        let january = CalendarMonth::new(2020, 1).expect("valid month");
        let day = NaiveDate::from_ymd_opt(2020, 10, 3).expect("valid day");

        let key = CacheKey::provider_appointments(&provider, day);

        assert!(key.has_prefix(&CacheKey::provider_appointments_in_month(
            &provider, october
        )));
        assert!(!key.has_prefix(&CacheKey::provider_appointments_in_month(
            &provider, january
        )));
    }

    #[rstest]
    fn providers_list_keys_share_a_prefix() {
        let key = CacheKey::providers_list(&UserId::random());
        assert!(key.has_prefix(&CacheKey::all_providers_lists()));
    }
}
