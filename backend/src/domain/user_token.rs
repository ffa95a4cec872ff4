//! Single-use password reset tokens.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::UserId;

/// How long a reset token stays valid after it was issued.
pub const RESET_TOKEN_TTL_HOURS: i64 = 2;

/// Opaque reset token bound to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserToken {
    pub id: Uuid,
    pub token: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl UserToken {
    /// Whether the token is past its validity window at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.created_at + Duration::hours(RESET_TOKEN_TTL_HOURS)
    }
}
