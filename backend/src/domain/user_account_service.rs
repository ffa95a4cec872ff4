//! Account lifecycle services: signup, profile reads and edits, avatars and
//! the providers directory.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CacheKey, CacheProvider, CreateUserRequest, HashProvider, ProfileQuery, ProvidersQuery,
    StorageProvider, UpdateAvatarRequest, UpdateProfileRequest, UserAccountCommand,
    UserRepository, recover_json, save_json,
};
use crate::domain::service_support::{
    EMAIL_IN_USE, log_cache_miss, map_cache_error, map_hash_error, map_storage_error,
    map_user_error,
};
use crate::domain::{Error, NewUser, User, UserId, UserProfile};

pub(crate) const USER_NOT_FOUND: &str = "User not found";
pub(crate) const AVATAR_REQUIRES_LOGIN: &str = "Only authenticated users can change avatar";
pub(crate) const OLD_PASSWORD_REQUIRED: &str =
    "You need to inform the old password to set a new password";
pub(crate) const OLD_PASSWORD_MISMATCH: &str = "Old password does not match";

/// Service implementing account commands plus the profile and providers
/// queries.
#[derive(Clone)]
pub struct UserAccountService<U, H, S, C> {
    users: Arc<U>,
    hasher: Arc<H>,
    storage: Arc<S>,
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<U, H, S, C> UserAccountService<U, H, S, C> {
    pub fn new(
        users: Arc<U>,
        hasher: Arc<H>,
        storage: Arc<S>,
        cache: Arc<C>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            storage,
            cache,
            clock,
        }
    }
}

impl<U, H, S, C> UserAccountService<U, H, S, C>
where
    U: UserRepository,
    C: CacheProvider,
{
    async fn load_user(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(user_id).await.map_err(map_user_error)
    }

    async fn forget_provider_lists(&self) -> Result<(), Error> {
        self.cache
            .invalidate_prefix(&CacheKey::all_providers_lists())
            .await
            .map_err(map_cache_error)
    }
}

#[async_trait]
impl<U, H, S, C> UserAccountCommand for UserAccountService<U, H, S, C>
where
    U: UserRepository,
    H: HashProvider,
    S: StorageProvider,
    C: CacheProvider,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserProfile, Error> {
        let CreateUserRequest {
            name,
            email,
            password,
        } = request;

        let taken = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?;
        if taken.is_some() {
            return Err(Error::invalid_request(EMAIL_IN_USE));
        }

        let password_hash = self
            .hasher
            .generate_hash(password.expose())
            .await
            .map_err(map_hash_error)?;

        let user = self
            .users
            .create(NewUser {
                name,
                email,
                password_hash,
            })
            .await
            .map_err(map_user_error)?;

        self.forget_provider_lists().await?;
        info!(user_id = %user.id(), "user registered");
        Ok(UserProfile::from(&user))
    }

    async fn update_profile(&self, request: UpdateProfileRequest) -> Result<UserProfile, Error> {
        let UpdateProfileRequest {
            user_id,
            name,
            email,
            old_password,
            password,
        } = request;

        let mut user = self
            .load_user(&user_id)
            .await?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;

        let owner = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?;
        if owner.is_some_and(|other| other.id() != &user_id) {
            return Err(Error::invalid_request(EMAIL_IN_USE));
        }

        let now = self.clock.utc();
        if let Some(new_password) = password {
            let old_password =
                old_password.ok_or_else(|| Error::invalid_request(OLD_PASSWORD_REQUIRED))?;
            let matches = self
                .hasher
                .compare_hash(old_password.expose(), user.password_hash())
                .await
                .map_err(map_hash_error)?;
            if !matches {
                return Err(Error::unauthorized(OLD_PASSWORD_MISMATCH));
            }
            let hash = self
                .hasher
                .generate_hash(new_password.expose())
                .await
                .map_err(map_hash_error)?;
            user.set_password_hash(hash, now);
        }

        user.update_details(name, email, now);
        self.users.save(&user).await.map_err(map_user_error)?;
        self.forget_provider_lists().await?;
        Ok(UserProfile::from(&user))
    }

    async fn update_avatar(&self, request: UpdateAvatarRequest) -> Result<UserProfile, Error> {
        let UpdateAvatarRequest { user_id, file_name } = request;

        let mut user = self
            .load_user(&user_id)
            .await?
            .ok_or_else(|| Error::unauthorized(AVATAR_REQUIRES_LOGIN))?;

        if let Some(previous) = user.avatar().map(str::to_owned) {
            self.discard_avatar(&user_id, &previous).await;
        }

        let stored = self
            .storage
            .save_file(&file_name)
            .await
            .map_err(map_storage_error)?;
        user.set_avatar(stored, self.clock.utc());

        self.users.save(&user).await.map_err(map_user_error)?;
        self.forget_provider_lists().await?;
        Ok(UserProfile::from(&user))
    }
}

impl<U, H, S, C> UserAccountService<U, H, S, C>
where
    S: StorageProvider,
{
    /// Remove a replaced avatar; failures only cost disk space.
    async fn discard_avatar(&self, user_id: &UserId, file: &str) {
        if let Err(error) = self.storage.delete_file(file).await {
            warn!(
                %error,
                kind = error.kind(),
                user_id = %user_id,
                file,
                "failed to delete previous avatar"
            );
        }
    }
}

#[async_trait]
impl<U, H, S, C> ProfileQuery for UserAccountService<U, H, S, C>
where
    U: UserRepository,
    H: HashProvider,
    S: StorageProvider,
    C: CacheProvider,
{
    async fn show_profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        self.load_user(user_id)
            .await?
            .map(|user| UserProfile::from(&user))
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<U, H, S, C> ProvidersQuery for UserAccountService<U, H, S, C>
where
    U: UserRepository,
    H: HashProvider,
    S: StorageProvider,
    C: CacheProvider,
{
    async fn list_providers(&self, user_id: &UserId) -> Result<Vec<UserProfile>, Error> {
        let key = CacheKey::providers_list(user_id);
        match recover_json::<_, Vec<UserProfile>>(self.cache.as_ref(), &key).await {
            Ok(Some(cached)) => {
                debug!(key = %key, "providers served from cache");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(error) => log_cache_miss(&error, key.as_str()),
        }

        let providers: Vec<UserProfile> = self
            .users
            .find_all_providers(user_id)
            .await
            .map_err(map_user_error)?
            .iter()
            .map(UserProfile::from)
            .collect();

        if let Err(error) = save_json(self.cache.as_ref(), &key, &providers).await {
            log_cache_miss(&error, key.as_str());
        }
        Ok(providers)
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
