//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};
use url::Url;

use crate::domain::ports::{
    MockAppointmentsCommand, MockAppointmentsQuery, MockAvailabilityQuery, MockLoginService,
    MockPasswordRecoveryCommand, MockProfileQuery, MockProvidersQuery, MockStorageProvider,
    MockUserAccountCommand,
};
use crate::domain::{ApiResult, EmailAddress, UserId, UserName, UserProfile};
use crate::inbound::http::error::{json_error_handler, query_error_handler};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::test_support::fixture_now;

pub const FILES_URL: &str = "http://localhost:3333/files/";

/// Session middleware for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Mocked driving ports; tests set expectations on the ones they exercise.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub accounts: MockUserAccountCommand,
    pub profile: MockProfileQuery,
    pub providers: MockProvidersQuery,
    pub password_recovery: MockPasswordRecoveryCommand,
    pub appointments: MockAppointmentsCommand,
    pub appointments_query: MockAppointmentsQuery,
    pub availability: MockAvailabilityQuery,
    pub uploads: MockStorageProvider,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                login: Arc::new(self.login),
                accounts: Arc::new(self.accounts),
                profile: Arc::new(self.profile),
                providers: Arc::new(self.providers),
                password_recovery: Arc::new(self.password_recovery),
                appointments: Arc::new(self.appointments),
                appointments_query: Arc::new(self.appointments_query),
                availability: Arc::new(self.availability),
                uploads: Arc::new(self.uploads),
            },
            Url::parse(FILES_URL).expect("valid files url"),
        )
    }
}

async fn sign_in_as(path: web::Path<String>, session: SessionContext) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(path.into_inner()).expect("test user id");
    session.sign_in(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// App wired like the server: state, extractor error handlers, sessions and
/// a `/test/sign-in/{id}` helper route, plus whatever `configure` registers.
pub fn test_app(
    state: HttpState,
    configure: impl FnOnce(&mut web::ServiceConfig),
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(test_session_middleware())
        .route("/test/sign-in/{id}", web::post().to(sign_in_as))
        .configure(configure)
}

/// Session cookie for `user_id`, obtained through the sign-in helper route.
pub async fn signed_in_cookie(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    user_id: &str,
) -> Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/test/sign-in/{user_id}"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "test sign-in failed");
    session_cookie(&res)
}

/// Profile fixture with a stable id.
pub fn profile(id: &str, name: &str, email: &str) -> UserProfile {
    let now = fixture_now();
    UserProfile {
        id: UserId::new(id).expect("fixture id"),
        name: UserName::new(name).expect("fixture name"),
        email: EmailAddress::new(email).expect("fixture email"),
        avatar: None,
        created_at: now,
        updated_at: now,
    }
}
