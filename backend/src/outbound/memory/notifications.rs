//! In-memory `NotificationRepository`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{NewNotification, Notification, UserId};

use super::lock_store;

pub struct InMemoryNotificationRepository {
    notifications: Mutex<Vec<Notification>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryNotificationRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Notifications addressed to `recipient`, oldest first.
    pub fn for_recipient(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let notifications = lock_store(&self.notifications, NotificationRepositoryError::query)?;
        Ok(notifications
            .iter()
            .filter(|n| &n.recipient_id == recipient)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, NotificationRepositoryError> {
        let stored = Notification {
            id: Uuid::new_v4(),
            recipient_id: notification.recipient_id,
            content: notification.content,
            read: false,
            created_at: self.clock.utc(),
        };
        lock_store(&self.notifications, NotificationRepositoryError::query)?.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixed_clock, fixture_now};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn notifications_start_unread() {
        let repo = InMemoryNotificationRepository::new(fixed_clock(fixture_now()));
        let recipient = UserId::random();

        repo.create(NewNotification {
            recipient_id: recipient.clone(),
            content: "hello".to_owned(),
        })
        .await
        .expect("create");

        let stored = repo.for_recipient(&recipient).expect("list");
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].read);
        assert!(repo.for_recipient(&UserId::random()).expect("list").is_empty());
    }
}
