//! Port for one-way password hashing.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by hash providers.
    pub enum HashError {
        /// Hashing failed or the stored hash could not be parsed.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HashProvider: Send + Sync {
    /// Produce a salted hash of `payload`.
    async fn generate_hash(&self, payload: &str) -> Result<String, HashError>;

    /// Check `payload` against a hash produced by [`HashProvider::generate_hash`].
    async fn compare_hash(&self, payload: &str, hashed: &str) -> Result<bool, HashError>;
}
