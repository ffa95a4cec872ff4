//! In-app notifications delivered to providers.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;

/// Stored notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: UserId,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for persisting a notification; new notifications start unread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub recipient_id: UserId,
    pub content: String,
}

/// Message sent to a provider when a slot is booked with them.
///
/// # Examples
/// ```
/// use booking::domain::booking_notification_content;
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2020, 5, 10, 13, 0, 0).unwrap();
/// assert_eq!(
///     booking_notification_content(date),
///     "New appointment booked for 10/05/2020 at 13:00"
/// );
/// ```
pub fn booking_notification_content(date: DateTime<Utc>) -> String {
    format!(
        "New appointment booked for {}",
        date.format("%d/%m/%Y at %H:%M")
    )
}
