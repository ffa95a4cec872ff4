//! Redis-backed cache adapter.
//!
//! Entries are JSON strings stored under `cache:<key>` with the port's TTL.
//! Prefix invalidation lists matching keys with `KEYS` and deletes them in a
//! single `DEL`; cache keys never contain glob characters, so the pattern
//! only matches the intended namespace.

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};
use bb8_redis::redis::AsyncCommands;
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{CACHE_NAMESPACE, CACHE_TTL, CacheError, CacheKey, CacheProvider};

/// Cache adapter over a `bb8` pool of Redis connections.
#[derive(Clone)]
pub struct RedisCacheProvider {
    pool: Pool<RedisConnectionManager>,
}

impl RedisCacheProvider {
    /// Connect a pool to `redis_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] when the URL is invalid or no
    /// connection can be opened.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let manager = RedisConnectionManager::new(redis_url)
            .map_err(|err| CacheError::backend(err.to_string()))?;
        let pool = Pool::builder()
            .max_size(8)
            .build(manager)
            .await
            .map_err(|err| CacheError::backend(err.to_string()))?;
        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|err| CacheError::backend(err.to_string()))
    }
}

pub(crate) fn namespaced(key: &CacheKey) -> String {
    format!("{CACHE_NAMESPACE}:{key}")
}

pub(crate) fn prefix_pattern(prefix: &CacheKey) -> String {
    format!("{CACHE_NAMESPACE}:{prefix}:*")
}

fn backend_error(error: impl std::fmt::Display) -> CacheError {
    CacheError::backend(error.to_string())
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn save(&self, key: &CacheKey, value: &Value) -> Result<(), CacheError> {
        let payload =
            serde_json::to_string(value).map_err(|err| CacheError::serialization(err.to_string()))?;
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(namespaced(key), payload, CACHE_TTL.as_secs())
            .await
            .map_err(backend_error)
    }

    async fn recover(&self, key: &CacheKey) -> Result<Option<Value>, CacheError> {
        let mut conn = self.connection().await?;
        let payload: Option<String> = conn.get(namespaced(key)).await.map_err(backend_error)?;
        payload
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|err| CacheError::serialization(err.to_string()))
            })
            .transpose()
    }

    async fn invalidate(&self, key: &CacheKey) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(namespaced(key))
            .await
            .map_err(backend_error)
    }

    async fn invalidate_prefix(&self, prefix: &CacheKey) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = conn
            .keys(prefix_pattern(prefix))
            .await
            .map_err(backend_error)?;
        if keys.is_empty() {
            return Ok(());
        }
        debug!(prefix = %prefix, count = keys.len(), "invalidating cached entries");
        conn.del::<_, ()>(keys).await.map_err(backend_error)
    }
}
