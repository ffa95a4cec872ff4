//! Response bodies shared by several handlers.
//!
//! Domain types stay free of framework derives; these wrappers shape them
//! into the camelCase JSON clients consume and register them with utoipa.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Appointment, DayAvailability, HourAvailability, UserProfile};
use crate::inbound::http::state::HttpState;

/// Public view of a user account.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "johndoe@example.com")]
    pub email: String,
    /// Stored avatar file name.
    pub avatar: Option<String>,
    /// Public URL of the avatar, `null` without one.
    #[schema(example = "http://localhost:3333/files/6f1c-avatar.png")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn new(profile: UserProfile, state: &HttpState) -> Self {
        let avatar_url = state.avatar_url(profile.avatar.as_deref());
        Self {
            id: profile.id.to_string(),
            name: profile.name.into(),
            email: profile.email.into(),
            avatar: profile.avatar,
            avatar_url,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// `{ "user": ... }` envelope returned by account endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

impl UserEnvelope {
    pub fn new(profile: UserProfile, state: &HttpState) -> Self {
        Self {
            user: UserResponse::new(profile, state),
        }
    }
}

/// A booked appointment.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: String,
    pub provider_id: String,
    /// The customer who booked the slot.
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(value: Appointment) -> Self {
        Self {
            id: value.id.to_string(),
            provider_id: value.provider_id.to_string(),
            user_id: value.user_id.to_string(),
            date: value.date,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// `{ "appointment": ... }` envelope returned after booking.
#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentEnvelope {
    pub appointment: AppointmentResponse,
}

impl From<Appointment> for AppointmentEnvelope {
    fn from(value: Appointment) -> Self {
        Self {
            appointment: value.into(),
        }
    }
}

/// Availability of one working hour.
#[derive(Debug, Serialize, ToSchema)]
pub struct HourAvailabilityResponse {
    #[schema(example = 14)]
    pub hour: u32,
    pub available: bool,
}

impl From<HourAvailability> for HourAvailabilityResponse {
    fn from(value: HourAvailability) -> Self {
        Self {
            hour: value.hour,
            available: value.available,
        }
    }
}

/// Availability of one calendar day.
#[derive(Debug, Serialize, ToSchema)]
pub struct DayAvailabilityResponse {
    #[schema(example = 21)]
    pub day: u32,
    pub available: bool,
}

impl From<DayAvailability> for DayAvailabilityResponse {
    fn from(value: DayAvailability) -> Self {
        Self {
            day: value.day,
            available: value.available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppointmentId;
    use crate::test_support::at;
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    #[rstest]
    fn appointments_serialise_in_camel_case() {
        let provider = crate::domain::UserId::random();
        let customer = crate::domain::UserId::random();
        let appointment = Appointment {
            id: AppointmentId::from_uuid(Uuid::nil()),
            provider_id: provider.clone(),
            user_id: customer.clone(),
            date: at(2020, 5, 20, 14),
            created_at: at(2020, 5, 10, 12),
            updated_at: at(2020, 5, 10, 12),
        };

        let body = serde_json::to_value(AppointmentResponse::from(appointment)).expect("json");

        assert_eq!(body["providerId"], json!(provider.to_string()));
        assert_eq!(body["userId"], json!(customer.to_string()));
        assert_eq!(body["date"], json!("2020-05-20T14:00:00Z"));
    }
}
