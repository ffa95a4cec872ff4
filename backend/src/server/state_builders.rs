//! Builders wiring domain services onto the configured adapters.
//!
//! PostgreSQL repositories replace the in-memory stores when a pool is
//! configured, and Redis replaces the process-local cache when connected.
//! Everything else (hashing, mail, templates, disk storage) is shared by
//! both setups.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::Clock;
use url::Url;

use booking::domain::ports::{
    AppointmentRepository, CacheProvider, NotificationRepository, UserRepository,
    UserTokenRepository,
};
use booking::domain::{
    AppointmentCommandService, AppointmentQueryService, AuthenticationService,
    PasswordRecoveryService, UserAccountService,
};
use booking::inbound::http::state::{HttpState, HttpStatePorts};
use booking::outbound::cache::InMemoryCacheProvider;
use booking::outbound::hashing::Argon2HashProvider;
use booking::outbound::mail::MailTransport;
use booking::outbound::mail_templates::HandlebarsMailTemplateProvider;
use booking::outbound::memory::{
    InMemoryAppointmentRepository, InMemoryNotificationRepository, InMemoryUserRepository,
    InMemoryUserTokenRepository,
};
use booking::outbound::persistence::{
    DbPool, DieselAppointmentRepository, DieselNotificationRepository, DieselUserRepository,
    DieselUserTokenRepository,
};
use booking::outbound::storage::DiskStorageProvider;

use super::ServerConfig;

/// Adapters that do not depend on the persistence choice.
struct SharedAdapters {
    hasher: Arc<Argon2HashProvider>,
    mail: Arc<MailTransport>,
    templates: Arc<HandlebarsMailTemplateProvider>,
    storage: Arc<DiskStorageProvider>,
    clock: Arc<dyn Clock>,
    web_url: Url,
}

struct Repositories<U, T, A, N> {
    users: Arc<U>,
    tokens: Arc<T>,
    appointments: Arc<A>,
    notifications: Arc<N>,
}

impl
    Repositories<
        DieselUserRepository,
        DieselUserTokenRepository,
        DieselAppointmentRepository,
        DieselNotificationRepository,
    >
{
    fn diesel(pool: &DbPool, clock: &Arc<dyn Clock>) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone(), clock.clone())),
            tokens: Arc::new(DieselUserTokenRepository::new(pool.clone(), clock.clone())),
            appointments: Arc::new(DieselAppointmentRepository::new(pool.clone(), clock.clone())),
            notifications: Arc::new(DieselNotificationRepository::new(
                pool.clone(),
                clock.clone(),
            )),
        }
    }
}

impl
    Repositories<
        InMemoryUserRepository,
        InMemoryUserTokenRepository,
        InMemoryAppointmentRepository,
        InMemoryNotificationRepository,
    >
{
    fn in_memory(clock: &Arc<dyn Clock>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new(clock.clone())),
            tokens: Arc::new(InMemoryUserTokenRepository::new(clock.clone())),
            appointments: Arc::new(InMemoryAppointmentRepository::new(clock.clone())),
            notifications: Arc::new(InMemoryNotificationRepository::new(clock.clone())),
        }
    }
}

fn wire_ports<U, T, A, N, C>(
    repos: Repositories<U, T, A, N>,
    cache: Arc<C>,
    shared: &SharedAdapters,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    T: UserTokenRepository + 'static,
    A: AppointmentRepository + 'static,
    N: NotificationRepository + 'static,
    C: CacheProvider + 'static,
{
    let accounts = Arc::new(UserAccountService::new(
        repos.users.clone(),
        shared.hasher.clone(),
        shared.storage.clone(),
        cache.clone(),
        shared.clock.clone(),
    ));
    let schedule = Arc::new(AppointmentQueryService::new(
        repos.appointments.clone(),
        cache.clone(),
        shared.clock.clone(),
    ));

    HttpStatePorts {
        login: Arc::new(AuthenticationService::new(
            repos.users.clone(),
            shared.hasher.clone(),
        )),
        accounts: accounts.clone(),
        profile: accounts.clone(),
        providers: accounts,
        password_recovery: Arc::new(PasswordRecoveryService::new(
            repos.users,
            repos.tokens,
            shared.mail.clone(),
            shared.templates.clone(),
            shared.hasher.clone(),
            shared.clock.clone(),
            shared.web_url.clone(),
        )),
        appointments: Arc::new(AppointmentCommandService::new(
            repos.appointments,
            repos.notifications,
            cache,
            shared.clock.clone(),
        )),
        appointments_query: schedule.clone(),
        availability: schedule,
        uploads: shared.storage.clone(),
    }
}

fn wire_with_cache<C>(config: &ServerConfig, cache: Arc<C>, shared: &SharedAdapters) -> HttpStatePorts
where
    C: CacheProvider + 'static,
{
    match &config.db_pool {
        Some(pool) => wire_ports(Repositories::diesel(pool, &shared.clock), cache, shared),
        None => wire_ports(Repositories::in_memory(&shared.clock), cache, shared),
    }
}

/// Build the handler state for `config`, reading time from `clock`.
///
/// # Errors
/// Fails when the bundled mail templates do not compile.
pub(super) fn build_http_state(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> io::Result<web::Data<HttpState>> {
    let templates = HandlebarsMailTemplateProvider::new()
        .map_err(|err| io::Error::other(format!("mail templates failed to compile: {err}")))?;
    let shared = SharedAdapters {
        hasher: Arc::new(Argon2HashProvider::new()),
        mail: Arc::new(config.mail.clone()),
        templates: Arc::new(templates),
        storage: config.storage.clone(),
        clock,
        web_url: config.urls.web.clone(),
    };
    let ports = match &config.cache {
        Some(redis) => wire_with_cache(config, Arc::new(redis.clone()), &shared),
        None => wire_with_cache(
            config,
            Arc::new(InMemoryCacheProvider::new(shared.clock.clone())),
            &shared,
        ),
    };
    Ok(web::Data::new(HttpState::new(ports, config.urls.files.clone())))
}
