//! Credential checking behind the login driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{HashProvider, LoginService, UserRepository};
use crate::domain::service_support::{map_hash_error, map_user_error};
use crate::domain::{Error, LoginCredentials, UserProfile};

pub(crate) const INVALID_CREDENTIALS: &str = "Incorrect email/password combination";

/// Authenticates users against stored password hashes.
///
/// Unknown emails and wrong passwords produce the same error so callers
/// cannot probe which accounts exist.
#[derive(Clone)]
pub struct AuthenticationService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AuthenticationService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> LoginService for AuthenticationService<U, H>
where
    U: UserRepository,
    H: HashProvider,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserProfile, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .compare_hash(credentials.password().expose(), user.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(UserProfile::from(&user))
    }
}
