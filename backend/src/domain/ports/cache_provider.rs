//! Port for the key/value cache used to memoise read-heavy queries.
//!
//! Values are JSON documents stored with a fixed TTL. The typed helpers
//! [`save_json`] and [`recover_json`] handle (de)serialisation so adapters
//! only ever see [`serde_json::Value`].
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{CacheKey, define_port_error};

/// Lifetime of every cache entry.
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Namespace prepended to every key stored by cache adapters.
pub const CACHE_NAMESPACE: &str = "cache";

define_port_error! {
    /// Errors surfaced by cache adapters.
    pub enum CacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "cache backend failure: {message}",
        /// Serialisation or deserialisation of cached content failed.
        Serialization { message: String } => "cache serialisation failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Store `value` under `key`, replacing any existing entry.
    async fn save(&self, key: &CacheKey, value: &Value) -> Result<(), CacheError>;

    /// Read the live entry stored under `key`.
    async fn recover(&self, key: &CacheKey) -> Result<Option<Value>, CacheError>;

    /// Remove the entry stored under `key`.
    async fn invalidate(&self, key: &CacheKey) -> Result<(), CacheError>;

    /// Remove every entry whose key falls under `prefix`.
    async fn invalidate_prefix(&self, prefix: &CacheKey) -> Result<(), CacheError>;
}

/// Serialise `value` and store it under `key`.
pub async fn save_json<C, T>(cache: &C, key: &CacheKey, value: &T) -> Result<(), CacheError>
where
    C: CacheProvider + ?Sized,
    T: Serialize + Sync,
{
    let json =
        serde_json::to_value(value).map_err(|err| CacheError::serialization(err.to_string()))?;
    cache.save(key, &json).await
}

/// Read the entry under `key` and deserialise it into `T`.
pub async fn recover_json<C, T>(cache: &C, key: &CacheKey) -> Result<Option<T>, CacheError>
where
    C: CacheProvider + ?Sized,
    T: DeserializeOwned,
{
    cache
        .recover(key)
        .await?
        .map(|value| {
            serde_json::from_value(value).map_err(|err| CacheError::serialization(err.to_string()))
        })
        .transpose()
}
