//! Backend entry-point: loads settings, connects adapters and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use booking::inbound::http::health::HealthState;
use booking::inbound::http::session_config::{BuildMode, session_settings_from_env};
use booking::outbound::cache::RedisCacheProvider;
use booking::outbound::mail::SmtpMailProvider;
use booking::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use booking::outbound::storage::DiskStorageProvider;
use booking::settings::AppSettings;

use server::{PublicUrls, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    let storage = DiskStorageProvider::open(&settings.tmp_dir(), &settings.uploads_dir())
        .wrap_err("failed to open upload directories")?;
    let urls = PublicUrls {
        files: settings.files_url()?,
        web: settings.web_url()?,
    };
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr()?,
        urls,
        storage,
    );

    match settings.database_url.as_deref() {
        Some(database_url) => {
            run_pending_migrations(database_url)
                .await
                .wrap_err("failed to apply database migrations")?;
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database URL configured; using in-memory repositories"),
    }

    match settings.redis_url.as_deref() {
        Some(redis_url) => {
            let cache = RedisCacheProvider::connect(redis_url)
                .await
                .wrap_err("failed to connect to Redis")?;
            config = config.with_cache(cache);
        }
        None => info!("no Redis URL configured; using the in-process cache"),
    }

    match settings.smtp_url.as_deref() {
        Some(smtp_url) => {
            let smtp = SmtpMailProvider::from_url(smtp_url, settings.mail_from())
                .wrap_err("invalid SMTP settings")?;
            config = config.with_smtp(smtp);
        }
        None => warn!("no SMTP URL configured; mail is kept in the in-process outbox"),
    }

    #[cfg(feature = "metrics")]
    {
        let metrics = server::metrics::build_metrics().wrap_err("failed to set up metrics")?;
        config = config.with_metrics(metrics);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
