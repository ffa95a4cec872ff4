//! OpenAPI documentation for the booking API.
//!
//! [`ApiDoc`] registers every inbound HTTP handler, the request and response
//! DTOs from [`crate::inbound::http`], and the session cookie security scheme.
//! Swagger UI serves it in debug builds; `openapi-dump` prints it as JSON.

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::appointments::AppointmentRequest;
use crate::inbound::http::password::{ForgotPasswordRequest, ResetPasswordBody};
use crate::inbound::http::profile::ProfileRequest;
use crate::inbound::http::schemas::{
    AppointmentEnvelope, AppointmentResponse, DayAvailabilityResponse, HourAvailabilityResponse,
    UserEnvelope, UserResponse,
};
use crate::inbound::http::sessions::LoginRequest;
use crate::inbound::http::users::{AvatarUpload, SignupRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /sessions.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Booking backend API",
        description = "Appointment booking between customers and service providers."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::sessions::create_session,
        crate::inbound::http::sessions::delete_session,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_avatar,
        crate::inbound::http::profile::show_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::password::forgot_password,
        crate::inbound::http::password::reset_password,
        crate::inbound::http::providers::list_providers,
        crate::inbound::http::providers::day_availability,
        crate::inbound::http::providers::month_availability,
        crate::inbound::http::appointments::create_appointment,
        crate::inbound::http::appointments::list_provider_appointments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        SignupRequest,
        AvatarUpload,
        ProfileRequest,
        ForgotPasswordRequest,
        ResetPasswordBody,
        AppointmentRequest,
        UserResponse,
        UserEnvelope,
        AppointmentResponse,
        AppointmentEnvelope,
        HourAvailabilityResponse,
        DayAvailabilityResponse,
    )),
    tags(
        (name = "sessions", description = "Sign in and out"),
        (name = "users", description = "Account creation and avatars"),
        (name = "profile", description = "The signed-in user's profile"),
        (name = "password", description = "Password recovery"),
        (name = "providers", description = "Providers and their availability"),
        (name = "appointments", description = "Booking and provider schedules"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
