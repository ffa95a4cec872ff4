//! Port for rendering email bodies from named templates.
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail template providers.
    pub enum MailTemplateError {
        /// No template is registered under the name.
        UnknownTemplate { name: String } => "unknown mail template: {name}",
        /// The template failed to compile or render.
        Render { message: String } => "mail template rendering failed: {message}",
    }
}

/// Templates the service knows how to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MailTemplate {
    /// Reset link for a forgotten password. Variables: `name`, `link`,
    /// `ttlHours`.
    ForgotPassword,
}

impl MailTemplate {
    /// Registry name of the template.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ForgotPassword => "forgot_password",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait MailTemplateProvider: Send + Sync {
    /// Render `template` with `variables` (a JSON object).
    fn parse(&self, template: MailTemplate, variables: &Value)
    -> Result<String, MailTemplateError>;
}
