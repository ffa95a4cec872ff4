//! Shared test doubles for service and adapter tests.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{EmailAddress, User, UserId, UserName, UserParts};

/// Clock whose current time tests can move forward.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// `2020-05-10 12:00 UTC`, the reference "now" used across service tests.
pub fn fixture_now() -> DateTime<Utc> {
    at(2020, 5, 10, 12)
}

/// Whole-hour UTC timestamp.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock frozen at `now`.
pub fn fixed_clock(now: DateTime<Utc>) -> Arc<dyn Clock> {
    Arc::new(MutableClock::new(now))
}

/// A stored user with the given name, email and password hash.
pub fn sample_user(name: &str, email: &str, password_hash: &str) -> User {
    let now = fixture_now();
    User::from(UserParts {
        id: UserId::random(),
        name: UserName::new(name).expect("valid fixture name"),
        email: EmailAddress::new(email).expect("valid fixture email"),
        password_hash: password_hash.to_owned(),
        avatar: None,
        created_at: now,
        updated_at: now,
    })
}
