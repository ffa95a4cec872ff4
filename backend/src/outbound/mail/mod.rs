//! Mail transports.
//!
//! [`SmtpMailProvider`] delivers through a relay configured by URL.
//! [`OutboxMailProvider`] keeps a bounded, in-process record of messages
//! for runs without a relay and for tests. [`MailTransport`] lets the server
//! choose between them at startup.

mod outbox;
mod smtp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{MailError, MailMessage, MailProvider};

pub use outbox::{OUTBOX_CAPACITY, OutboxMailProvider};
pub use smtp::SmtpMailProvider;

/// The mail adapter selected at startup.
#[derive(Clone)]
pub enum MailTransport {
    Smtp(Arc<SmtpMailProvider>),
    Outbox(Arc<OutboxMailProvider>),
}

#[async_trait]
impl MailProvider for MailTransport {
    async fn send_mail(&self, message: MailMessage) -> Result<(), MailError> {
        match self {
            Self::Smtp(smtp) => smtp.send_mail(message).await,
            Self::Outbox(outbox) => outbox.send_mail(message).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailAddress;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn outbox_transport_records_messages() {
        let outbox = Arc::new(OutboxMailProvider::new());
        let transport = MailTransport::Outbox(outbox.clone());

        transport
            .send_mail(MailMessage {
                to_name: "Ada".into(),
                to: EmailAddress::new("ada@example.com").expect("valid email"),
                subject: "hi".into(),
                body: "hello".into(),
            })
            .await
            .expect("send");

        assert_eq!(outbox.sent().len(), 1);
    }
}
