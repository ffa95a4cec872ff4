//! Argon2id password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) with a random salt per
//! call. Both operations are CPU-bound and run on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, Params};
use async_trait::async_trait;

use crate::domain::ports::{HashError, HashProvider};

/// [`HashProvider`] backed by the `argon2` crate.
#[derive(Debug, Clone, Default)]
pub struct Argon2HashProvider {
    params: Option<Params>,
}

impl Argon2HashProvider {
    /// Provider with the crate's default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider with explicit cost parameters, e.g. cheaper ones in tests.
    pub fn with_params(params: Params) -> Self {
        Self {
            params: Some(params),
        }
    }

    fn hasher(params: Option<Params>) -> Argon2<'static> {
        params.map_or_else(Argon2::default, |params| {
            Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
        })
    }
}

fn hash(params: Option<Params>, payload: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2HashProvider::hasher(params)
        .hash_password(payload.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| HashError::hash(err.to_string()))
}

fn verify(params: Option<Params>, payload: &str, hashed: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(hashed).map_err(|err| HashError::hash(err.to_string()))?;
    Ok(Argon2HashProvider::hasher(params)
        .verify_password(payload.as_bytes(), &parsed)
        .is_ok())
}

async fn blocking<T, F>(work: F) -> Result<T, HashError>
where
    F: FnOnce() -> Result<T, HashError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| HashError::hash(err.to_string()))?
}

#[async_trait]
impl HashProvider for Argon2HashProvider {
    async fn generate_hash(&self, payload: &str) -> Result<String, HashError> {
        let params = self.params.clone();
        let payload = payload.to_owned();
        blocking(move || hash(params, &payload)).await
    }

    async fn compare_hash(&self, payload: &str, hashed: &str) -> Result<bool, HashError> {
        let params = self.params.clone();
        let payload = payload.to_owned();
        let hashed = hashed.to_owned();
        blocking(move || verify(params, &payload, &hashed)).await
    }
}
