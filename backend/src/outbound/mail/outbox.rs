//! In-process outbox used when no SMTP relay is configured.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{MailError, MailMessage, MailProvider};

/// Messages retained before the oldest is dropped.
pub const OUTBOX_CAPACITY: usize = 100;

/// [`MailProvider`] that records messages instead of delivering them.
///
/// Only the recipient and subject are logged; bodies carry reset links.
#[derive(Default)]
pub struct OutboxMailProvider {
    outbox: Mutex<VecDeque<MailMessage>>,
}

impl OutboxMailProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, VecDeque<MailMessage>>, MailError> {
        self.outbox
            .lock()
            .map_err(|_| MailError::delivery("mail outbox lock poisoned"))
    }

    /// Retained messages, oldest first.
    pub fn sent(&self) -> Vec<MailMessage> {
        self.lock()
            .map(|outbox| outbox.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MailProvider for OutboxMailProvider {
    async fn send_mail(&self, message: MailMessage) -> Result<(), MailError> {
        info!(to = %message.to, subject = %message.subject, "mail kept in outbox");
        let mut outbox = self.lock()?;
        if outbox.len() == OUTBOX_CAPACITY {
            outbox.pop_front();
        }
        outbox.push_back(message);
        Ok(())
    }
}
