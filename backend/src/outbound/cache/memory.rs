//! Process-local cache used when no Redis URL is configured.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde_json::Value;

use crate::domain::ports::{CACHE_TTL, CacheError, CacheKey, CacheProvider};

struct Entry {
    value: Value,
    expires_at: DateTime<Utc>,
}

/// In-memory [`CacheProvider`] with the same TTL as the Redis adapter.
pub struct InMemoryCacheProvider {
    entries: Mutex<HashMap<CacheKey, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCacheProvider {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<CacheKey, Entry>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::backend("in-memory cache lock poisoned"))
    }

    fn ttl() -> TimeDelta {
        TimeDelta::from_std(CACHE_TTL).unwrap_or(TimeDelta::MAX)
    }
}

#[async_trait]
impl CacheProvider for InMemoryCacheProvider {
    async fn save(&self, key: &CacheKey, value: &Value) -> Result<(), CacheError> {
        let now = self.clock.utc();
        let expires_at = now + Self::ttl();
        let mut entries = self.lock()?;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.clone(),
            Entry {
                value: value.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn recover(&self, key: &CacheKey) -> Result<Option<Value>, CacheError> {
        let now = self.clock.utc();
        let mut entries = self.lock()?;
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
        }
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn invalidate(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.lock()?.remove(key);
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &CacheKey) -> Result<(), CacheError> {
        self.lock()?.retain(|key, _| !key.has_prefix(prefix));
        Ok(())
    }
}
