//! Driving port for account lifecycle changes: signup, profile edits and
//! avatar uploads.
use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, Password, UserId, UserName, UserProfile};

/// Signup payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: Password,
}

/// Profile edit payload.
///
/// `password` replaces the current password and requires `old_password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    pub user_id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub old_password: Option<Password>,
    pub password: Option<Password>,
}

/// Avatar replacement payload; `file_name` names an uploaded temporary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAvatarRequest {
    pub user_id: UserId,
    pub file_name: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountCommand: Send + Sync {
    /// Register a new account.
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserProfile, Error>;

    /// Change name, email and optionally the password.
    async fn update_profile(&self, request: UpdateProfileRequest) -> Result<UserProfile, Error>;

    /// Store a new avatar, replacing any previous one.
    async fn update_avatar(&self, request: UpdateAvatarRequest) -> Result<UserProfile, Error>;
}
