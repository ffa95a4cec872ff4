//! Session (login/logout) handlers.
//!
//! ```text
//! POST /sessions {"email":"johndoe@example.com","password":"123456"}
//! DELETE /sessions
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::schemas::UserEnvelope;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error};

/// Login request body for `POST /sessions`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "johndoe@example.com")]
    pub email: String,
    #[schema(example = "123456")]
    pub password: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail(inner) => {
            invalid_field_error(FieldName::new("email"), inner)
        }
        LoginValidationError::EmptyPassword => {
            invalid_field_error(FieldName::new("password"), "password must not be empty")
        }
    }
}

/// Authenticate and establish a cookie session.
#[utoipa::path(
    post,
    path = "/sessions",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            headers(("Set-Cookie" = String, description = "Session cookie")),
            body = UserEnvelope
        ),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Incorrect email/password combination", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["sessions"],
    operation_id = "createSession",
    security([])
)]
#[post("/sessions")]
pub async fn create_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_login_validation_error)?;
    let profile = state.login.authenticate(&credentials).await?;
    session.sign_in(&profile.id)?;
    Ok(web::Json(UserEnvelope::new(profile, &state)))
}

/// End the current session; succeeds without one.
#[utoipa::path(
    delete,
    path = "/sessions",
    responses((status = 204, description = "Session cleared")),
    tags = ["sessions"],
    operation_id = "deleteSession",
    security([])
)]
#[delete("/sessions")]
pub async fn delete_session(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::profile::show_profile;
    use crate::inbound::http::test_utils::{TestPorts, profile, session_cookie, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    const USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[actix_web::test]
    async fn login_sets_a_session_usable_by_protected_routes() {
        let mut ports = TestPorts::default();
        ports
            .login
            .expect_authenticate()
            .withf(|creds| {
                creds.email().as_ref() == "johndoe@example.com"
                    && creds.password().expose() == "123456"
            })
            .times(1)
            .return_once(|_| Ok(profile(USER, "John Doe", "johndoe@example.com")));
        ports
            .profile
            .expect_show_profile()
            .return_once(|_| Ok(profile(USER, "John Doe", "johndoe@example.com")));
        let app = actix_test::init_service(test_app(ports.into_state(), |cfg| {
            cfg.service(create_session).service(show_profile);
        }))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/sessions")
                .set_json(json!({"email": "JohnDoe@Example.com", "password": "123456"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["user"]["id"], USER);
        assert!(body["user"].get("password").is_none());

        let me = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/profile")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn wrong_credentials_are_unauthorised() {
        let mut ports = TestPorts::default();
        ports.login.expect_authenticate().return_once(|_| {
            Err(Error::unauthorized("Incorrect email/password combination"))
        });
        let app =
            actix_test::init_service(test_app(ports.into_state(), |cfg| {
                cfg.service(create_session);
            }))
            .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/sessions")
                .set_json(json!({"email": "johndoe@example.com", "password": "wrong"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "Incorrect email/password combination");
    }

    #[rstest]
    #[case(json!({"email": "not-an-email", "password": "123456"}), "email")]
    #[case(json!({"email": "johndoe@example.com", "password": ""}), "password")]
    #[actix_web::test]
    async fn malformed_credentials_are_rejected_before_lookup(
        #[case] payload: Value,
        #[case] field: &str,
    ) {
        let app = actix_test::init_service(test_app(TestPorts::default().into_state(), |cfg| {
            cfg.service(create_session);
        }))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/sessions")
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[rstest]
    fn validation_errors_map_to_invalid_request() {
        let error = map_login_validation_error(LoginValidationError::EmptyPassword);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[actix_web::test]
    async fn logout_always_succeeds() {
        let app = actix_test::init_service(test_app(TestPorts::default().into_state(), |cfg| {
            cfg.service(delete_session);
        }))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri("/sessions").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
