//! Account handlers: signup and avatar upload.
//!
//! ```text
//! POST /users {"name":"John Doe","email":"johndoe@example.com","password":"123456"}
//! PATCH /users/avatar (multipart/form-data, field "avatar")
//! ```

use actix_multipart::{Multipart, MultipartError};
use actix_web::{patch, post, web};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::{CreateUserRequest, UpdateAvatarRequest};
use crate::domain::{ApiResult, EmailAddress, Error, Password, UserName};
use crate::inbound::http::schemas::UserEnvelope;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, missing_field_error};

const AVATAR_FIELD: FieldName = FieldName::new("avatar");
const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Signup request body for `POST /users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "johndoe@example.com")]
    pub email: String,
    #[schema(example = "123456")]
    pub password: String,
}

impl TryFrom<SignupRequest> for CreateUserRequest {
    type Error = Error;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: UserName::new(&value.name)
                .map_err(|err| invalid_field_error(FieldName::new("name"), err))?,
            email: EmailAddress::new(&value.email)
                .map_err(|err| invalid_field_error(FieldName::new("email"), err))?,
            password: Password::new(value.password)
                .map_err(|err| invalid_field_error(FieldName::new("password"), err))?,
        })
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/users",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = UserEnvelope),
        (status = 400, description = "Invalid request or email already used", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let request = CreateUserRequest::try_from(payload.into_inner())?;
    let profile = state.accounts.create_user(request).await?;
    Ok(web::Json(UserEnvelope::new(profile, &state)))
}

/// Multipart form schema for the avatar upload.
#[derive(ToSchema)]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct AvatarUpload {
    #[schema(value_type = String, format = Binary)]
    avatar: Vec<u8>,
}

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

fn multipart_error(err: MultipartError) -> Error {
    warn!(error = %err, "rejected multipart payload");
    Error::invalid_request(format!("invalid multipart payload: {err}"))
}

/// Read the `avatar` field, skipping any other parts.
async fn read_avatar(mut payload: Multipart) -> Result<Upload, Error> {
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        if field.name() != Some("avatar") {
            continue;
        }
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .unwrap_or("avatar")
            .to_owned();
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            if bytes.len() + chunk.len() > MAX_AVATAR_BYTES {
                return Err(invalid_field_error(
                    AVATAR_FIELD,
                    format!("avatar must be at most {MAX_AVATAR_BYTES} bytes"),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            return Err(invalid_field_error(AVATAR_FIELD, "avatar must not be empty"));
        }
        return Ok(Upload { file_name, bytes });
    }
    Err(missing_field_error(AVATAR_FIELD))
}

/// Replace the signed-in user's avatar.
#[utoipa::path(
    patch,
    path = "/users/avatar",
    request_body(content = AvatarUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Avatar updated", body = UserEnvelope),
        (status = 400, description = "Missing or invalid file", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateAvatar"
)]
#[patch("/users/avatar")]
pub async fn update_avatar(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Multipart,
) -> ApiResult<web::Json<UserEnvelope>> {
    let user_id = session.require_user_id()?;
    let upload = read_avatar(payload).await?;
    let staged = state
        .uploads
        .stage_upload(&upload.file_name, upload.bytes)
        .await
        .map_err(|err| Error::internal(err.to_string()))?;
    let updated = state
        .accounts
        .update_avatar(UpdateAvatarRequest {
            user_id,
            file_name: staged.clone(),
        })
        .await;
    match updated {
        Ok(profile) => Ok(web::Json(UserEnvelope::new(profile, &state))),
        Err(error) => {
            if let Err(discard) = state.uploads.discard_upload(&staged).await {
                warn!(error = %discard, file = %staged, "failed to discard staged avatar");
            }
            Err(error)
        }
    }
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
