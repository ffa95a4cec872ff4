//! Port for outbound transactional email.
use async_trait::async_trait;

use crate::domain::EmailAddress;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail providers.
    pub enum MailError {
        /// The message could not be handed to the transport.
        Delivery { message: String } => "mail delivery failed: {message}",
        /// The transport or an address is misconfigured.
        Config { message: String } => "mail configuration invalid: {message}",
    }
}

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to_name: String,
    pub to: EmailAddress,
    pub subject: String,
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Send `message` once; delivery is not retried.
    async fn send_mail(&self, message: MailMessage) -> Result<(), MailError>;
}
