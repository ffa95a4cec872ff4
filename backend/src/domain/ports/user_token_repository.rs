//! Port abstraction for password reset token persistence.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{UserId, UserToken};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user token repository adapters.
    pub enum UserTokenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user token repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user token repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserTokenRepository: Send + Sync {
    /// Issue a fresh token for `user_id`.
    async fn generate(&self, user_id: &UserId) -> Result<UserToken, UserTokenRepositoryError>;

    /// Look up a token by its opaque value.
    async fn find_by_token(&self, token: &Uuid)
    -> Result<Option<UserToken>, UserTokenRepositoryError>;

    /// Remove a token so it cannot be used again.
    async fn delete(&self, token_id: &Uuid) -> Result<(), UserTokenRepositoryError>;
}
