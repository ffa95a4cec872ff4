//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use url::Url;

use crate::domain::ports::{
    AppointmentsCommand, AppointmentsQuery, AvailabilityQuery, LoginService,
    PasswordRecoveryCommand, ProfileQuery, ProvidersQuery, StorageProvider, UserAccountCommand,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserAccountCommand>,
    pub profile: Arc<dyn ProfileQuery>,
    pub providers: Arc<dyn ProvidersQuery>,
    pub password_recovery: Arc<dyn PasswordRecoveryCommand>,
    pub appointments: Arc<dyn AppointmentsCommand>,
    pub appointments_query: Arc<dyn AppointmentsQuery>,
    pub availability: Arc<dyn AvailabilityQuery>,
    /// Staging area for multipart avatar uploads.
    pub uploads: Arc<dyn StorageProvider>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserAccountCommand>,
    pub profile: Arc<dyn ProfileQuery>,
    pub providers: Arc<dyn ProvidersQuery>,
    pub password_recovery: Arc<dyn PasswordRecoveryCommand>,
    pub appointments: Arc<dyn AppointmentsCommand>,
    pub appointments_query: Arc<dyn AppointmentsQuery>,
    pub availability: Arc<dyn AvailabilityQuery>,
    pub uploads: Arc<dyn StorageProvider>,
    files_url: Url,
}

impl HttpState {
    /// Construct state from the ports bundle and the public base URL under
    /// which stored avatars are served.
    ///
    /// A missing trailing slash is added to `files_url` so file names are
    /// appended to its path rather than replacing its last segment.
    pub fn new(ports: HttpStatePorts, files_url: Url) -> Self {
        let HttpStatePorts {
            login,
            accounts,
            profile,
            providers,
            password_recovery,
            appointments,
            appointments_query,
            availability,
            uploads,
        } = ports;
        Self {
            login,
            accounts,
            profile,
            providers,
            password_recovery,
            appointments,
            appointments_query,
            availability,
            uploads,
            files_url: with_trailing_slash(files_url),
        }
    }

    /// Public URL of a stored avatar.
    pub fn avatar_url(&self, avatar: Option<&str>) -> Option<String> {
        avatar_url_for(&self.files_url, avatar)
    }
}

/// Join `avatar` onto `files_url`; `None` without an avatar.
///
/// # Examples
/// ```
/// # use booking::inbound::http::state::avatar_url_for;
/// let base = url::Url::parse("http://localhost:3333/files/").unwrap();
/// assert_eq!(
///     avatar_url_for(&base, Some("a1-me.png")).as_deref(),
///     Some("http://localhost:3333/files/a1-me.png"),
/// );
/// assert_eq!(avatar_url_for(&base, None), None);
/// ```
pub fn avatar_url_for(files_url: &Url, avatar: Option<&str>) -> Option<String> {
    avatar.and_then(|file| files_url.join(file).ok().map(String::from))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
