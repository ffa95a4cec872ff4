//! Driving port for reading a user's own profile.
use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Fetch the profile for `user_id` or fail with `not_found`.
    async fn show_profile(&self, user_id: &UserId) -> Result<UserProfile, Error>;
}
