//! Password recovery handlers.
//!
//! ```text
//! POST /password/forgot {"email":"johndoe@example.com"}
//! POST /password/reset {"token":"<uuid>","password":"123123"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::ResetPasswordRequest;
use crate::domain::{ApiResult, EmailAddress, Error, Password};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error};

/// Request body for `POST /password/forgot`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ForgotPasswordRequest {
    #[schema(example = "johndoe@example.com")]
    pub email: String,
}

/// Request body for `POST /password/reset`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ResetPasswordBody {
    /// Token from the emailed reset link.
    pub token: String,
    pub password: String,
}

impl TryFrom<ResetPasswordBody> for ResetPasswordRequest {
    type Error = Error;

    fn try_from(value: ResetPasswordBody) -> Result<Self, Self::Error> {
        let token = Uuid::parse_str(&value.token).map_err(|_| {
            invalid_field_error(FieldName::new("token"), "token must be a valid UUID")
        })?;
        let password = Password::new(value.password)
            .map_err(|err| invalid_field_error(FieldName::new("password"), err))?;
        Ok(Self { token, password })
    }
}

/// Email a password reset link.
#[utoipa::path(
    post,
    path = "/password/forgot",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 204, description = "Reset link sent"),
        (status = 400, description = "Invalid email or user does not exist", body = Error)
    ),
    tags = ["password"],
    operation_id = "forgotPassword",
    security([])
)]
#[post("/password/forgot")]
pub async fn forgot_password(
    state: web::Data<HttpState>,
    payload: web::Json<ForgotPasswordRequest>,
) -> ApiResult<HttpResponse> {
    let email = EmailAddress::new(&payload.email)
        .map_err(|err| invalid_field_error(FieldName::new("email"), err))?;
    state
        .password_recovery
        .send_forgot_password_email(&email)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Consume a reset token and set a new password.
#[utoipa::path(
    post,
    path = "/password/reset",
    request_body = ResetPasswordBody,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Unknown or expired token", body = Error)
    ),
    tags = ["password"],
    operation_id = "resetPassword",
    security([])
)]
#[post("/password/reset")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    payload: web::Json<ResetPasswordBody>,
) -> ApiResult<HttpResponse> {
    let request = ResetPasswordRequest::try_from(payload.into_inner())?;
    state.password_recovery.reset_password(request).await?;
    Ok(HttpResponse::NoContent().finish())
}
