//! Profile handlers for the signed-in user.
//!
//! ```text
//! GET /profile
//! PUT /profile {"name":"John Tre","email":"johntre@example.com","oldPassword":"123456","password":"123123"}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UpdateProfileRequest;
use crate::domain::{ApiResult, EmailAddress, Error, Password, UserId, UserName};
use crate::inbound::http::schemas::UserResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error};

/// Request body for `PUT /profile`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub name: String,
    pub email: String,
    /// Required when `password` is present.
    #[serde(default)]
    pub old_password: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Blank optional passwords count as absent.
fn optional_password(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<Password>, Error> {
    value
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            Password::new(raw).map_err(|err| invalid_field_error(FieldName::new(field), err))
        })
        .transpose()
}

fn parse_profile_request(
    user_id: UserId,
    payload: ProfileRequest,
) -> Result<UpdateProfileRequest, Error> {
    Ok(UpdateProfileRequest {
        user_id,
        name: UserName::new(&payload.name)
            .map_err(|err| invalid_field_error(FieldName::new("name"), err))?,
        email: EmailAddress::new(&payload.email)
            .map_err(|err| invalid_field_error(FieldName::new("email"), err))?,
        old_password: optional_password(payload.old_password, "oldPassword")?,
        password: optional_password(payload.password, "password")?,
    })
}

/// Show the signed-in user's profile.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["profile"],
    operation_id = "showProfile"
)]
#[get("/profile")]
pub async fn show_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state.profile.show_profile(&user_id).await?;
    Ok(web::Json(UserResponse::new(profile, &state)))
}

/// Update name, email and optionally the password.
#[utoipa::path(
    put,
    path = "/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid request, email in use or old password missing", body = Error),
        (status = 401, description = "Unauthorised or old password does not match", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let request = parse_profile_request(user_id, payload.into_inner())?;
    let profile = state.accounts.update_profile(request).await?;
    Ok(web::Json(UserResponse::new(profile, &state)))
}
