//! Driving port for the forgot/reset password flow.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{EmailAddress, Error, Password};

/// Reset payload carrying the emailed token and the new password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPasswordRequest {
    pub token: Uuid,
    pub password: Password,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordRecoveryCommand: Send + Sync {
    /// Issue a reset token and email the reset link.
    async fn send_forgot_password_email(&self, email: &EmailAddress) -> Result<(), Error>;

    /// Consume a reset token and store the new password.
    async fn reset_password(&self, request: ResetPasswordRequest) -> Result<(), Error>;
}
