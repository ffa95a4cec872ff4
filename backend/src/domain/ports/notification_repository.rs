//! Port abstraction for notification persistence.
use async_trait::async_trait;

use crate::domain::{NewNotification, Notification};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notification repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Store a new, unread notification.
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, NotificationRepositoryError>;
}
