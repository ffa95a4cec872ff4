//! Driving port for browsing providers.
use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProvidersQuery: Send + Sync {
    /// Every provider except the requesting user.
    async fn list_providers(&self, user_id: &UserId) -> Result<Vec<UserProfile>, Error>;
}
