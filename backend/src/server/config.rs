//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use booking::outbound::cache::RedisCacheProvider;
use booking::outbound::mail::{MailTransport, OutboxMailProvider, SmtpMailProvider};
use booking::outbound::persistence::DbPool;
use booking::outbound::storage::DiskStorageProvider;
use url::Url;

/// Public base URLs baked into responses and emails.
#[derive(Debug, Clone)]
pub struct PublicUrls {
    /// Joined with avatar file names to build `avatarUrl`.
    pub files: Url,
    /// Front-end base for password reset links.
    pub web: Url,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) urls: PublicUrls,
    pub(crate) storage: Arc<DiskStorageProvider>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cache: Option<RedisCacheProvider>,
    pub(crate) mail: MailTransport,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        urls: PublicUrls,
        storage: DiskStorageProvider,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            urls,
            storage: Arc::new(storage),
            db_pool: None,
            cache: None,
            mail: MailTransport::Outbox(Arc::new(OutboxMailProvider::new())),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Use PostgreSQL repositories instead of the in-memory stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Use Redis instead of the process-local cache.
    #[must_use]
    pub fn with_cache(mut self, cache: RedisCacheProvider) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Deliver mail through an SMTP relay instead of the outbox.
    #[must_use]
    pub fn with_smtp(mut self, smtp: SmtpMailProvider) -> Self {
        self.mail = MailTransport::Smtp(Arc::new(smtp));
        self
    }

    /// Record request metrics and serve them on `/metrics`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: PrometheusMetrics) -> Self {
        self.prometheus = Some(prometheus);
        self
    }
}
