//! Cache adapters implementing [`crate::domain::ports::CacheProvider`].
//!
//! - `RedisCacheProvider`: shared cache through `bb8-redis`.
//! - `InMemoryCacheProvider`: process-local fallback with the same TTL and
//!   prefix semantics, used when no Redis URL is configured and in tests.

mod memory;
mod redis;

pub use memory::InMemoryCacheProvider;
pub use redis::RedisCacheProvider;
