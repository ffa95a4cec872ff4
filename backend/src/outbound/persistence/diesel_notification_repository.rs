//! PostgreSQL-backed `NotificationRepository` implementation using Diesel ORM.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{NewNotification, Notification, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::{NewNotificationRow, NotificationRow};
use super::pool::DbPool;
use super::schema::notifications;

/// Diesel-backed implementation of the notification repository port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselNotificationRepository {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, NotificationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, NotificationRepositoryError::connection))?;
        let now = self.clock.utc();
        let row = NewNotificationRow {
            id: Uuid::new_v4(),
            recipient_id: *notification.recipient_id.as_uuid(),
            content: &notification.content,
            read: false,
            created_at: now,
            updated_at: now,
        };

        let stored = diesel::insert_into(notifications::table)
            .values(&row)
            .returning(NotificationRow::as_returning())
            .get_result::<NotificationRow>(&mut conn)
            .await
            .map_err(|err| {
                map_basic_diesel_error(
                    err,
                    NotificationRepositoryError::query,
                    NotificationRepositoryError::connection,
                )
            })?;

        Ok(Notification {
            id: stored.id,
            recipient_id: UserId::from_uuid(stored.recipient_id),
            content: stored.content,
            read: stored.read,
            created_at: stored.created_at,
        })
    }
}
