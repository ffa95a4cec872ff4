//! Forgot/reset password flow.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;
use url::Url;
use uuid::Uuid;

use crate::domain::ports::{
    HashProvider, MailMessage, MailProvider, MailTemplate, MailTemplateProvider,
    PasswordRecoveryCommand, ResetPasswordRequest, UserRepository, UserTokenRepository,
};
use crate::domain::service_support::{
    map_hash_error, map_mail_error, map_template_error, map_token_error, map_user_error,
};
use crate::domain::{EmailAddress, Error, RESET_TOKEN_TTL_HOURS, User};

pub(crate) const USER_MISSING: &str = "User does not exist";
pub(crate) const TOKEN_MISSING: &str = "User token does not exist";
pub(crate) const TOKEN_EXPIRED: &str = "Token expired";
pub(crate) const RECOVERY_SUBJECT: &str = "[Booking] Password recovery";

/// Issues reset tokens by email and consumes them to set new passwords.
#[derive(Clone)]
pub struct PasswordRecoveryService<U, T, M, R, H> {
    users: Arc<U>,
    tokens: Arc<T>,
    mail: Arc<M>,
    templates: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
    web_url: Url,
}

impl<U, T, M, R, H> PasswordRecoveryService<U, T, M, R, H> {
    /// `web_url` is the base of the front-end that serves the reset form.
    pub fn new(
        users: Arc<U>,
        tokens: Arc<T>,
        mail: Arc<M>,
        templates: Arc<R>,
        hasher: Arc<H>,
        clock: Arc<dyn Clock>,
        web_url: Url,
    ) -> Self {
        Self {
            users,
            tokens,
            mail,
            templates,
            hasher,
            clock,
            web_url,
        }
    }

    fn reset_link(&self, token: &Uuid) -> String {
        format!(
            "{}/reset-password?token={token}",
            self.web_url.as_str().trim_end_matches('/')
        )
    }

}

impl<U, T, M, R, H> PasswordRecoveryService<U, T, M, R, H>
where
    R: MailTemplateProvider,
{
    fn recovery_message(&self, user: &User, token: &Uuid) -> Result<MailMessage, Error> {
        let variables = json!({
            "name": user.name().to_string(),
            "link": self.reset_link(token),
            "ttlHours": RESET_TOKEN_TTL_HOURS,
        });
        let body = self
            .templates
            .parse(MailTemplate::ForgotPassword, &variables)
            .map_err(map_template_error)?;
        Ok(MailMessage {
            to_name: user.name().to_string(),
            to: user.email().clone(),
            subject: RECOVERY_SUBJECT.to_owned(),
            body,
        })
    }
}

#[async_trait]
impl<U, T, M, R, H> PasswordRecoveryCommand for PasswordRecoveryService<U, T, M, R, H>
where
    U: UserRepository,
    T: UserTokenRepository,
    M: MailProvider,
    R: MailTemplateProvider,
    H: HashProvider,
{
    async fn send_forgot_password_email(&self, email: &EmailAddress) -> Result<(), Error> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::invalid_request(USER_MISSING))?;

        let token = self
            .tokens
            .generate(user.id())
            .await
            .map_err(map_token_error)?;

        let message = self.recovery_message(&user, &token.token)?;
        self.mail
            .send_mail(message)
            .await
            .map_err(map_mail_error)?;

        info!(user_id = %user.id(), "password recovery email sent");
        Ok(())
    }

    async fn reset_password(&self, request: ResetPasswordRequest) -> Result<(), Error> {
        let ResetPasswordRequest { token, password } = request;

        let user_token = self
            .tokens
            .find_by_token(&token)
            .await
            .map_err(map_token_error)?
            .ok_or_else(|| Error::invalid_request(TOKEN_MISSING))?;

        let mut user = self
            .users
            .find_by_id(&user_token.user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::invalid_request(USER_MISSING))?;

        let now = self.clock.utc();
        if user_token.is_expired(now) {
            return Err(Error::invalid_request(TOKEN_EXPIRED));
        }

        let hash = self
            .hasher
            .generate_hash(password.expose())
            .await
            .map_err(map_hash_error)?;
        user.set_password_hash(hash, now);
        self.users.save(&user).await.map_err(map_user_error)?;

        self.tokens
            .delete(&user_token.id)
            .await
            .map_err(map_token_error)?;

        info!(user_id = %user.id(), "password reset");
        Ok(())
    }
}

#[cfg(test)]
#[path = "password_recovery_service_tests.rs"]
mod tests;
