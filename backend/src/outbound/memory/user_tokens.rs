//! In-memory `UserTokenRepository`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{UserTokenRepository, UserTokenRepositoryError};
use crate::domain::{UserId, UserToken};

use super::lock_store;

pub struct InMemoryUserTokenRepository {
    tokens: Mutex<Vec<UserToken>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserTokenRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Tokens issued to `user_id`, oldest first.
    pub fn issued_to(&self, user_id: &UserId) -> Result<Vec<UserToken>, UserTokenRepositoryError> {
        let tokens = lock_store(&self.tokens, UserTokenRepositoryError::query)?;
        Ok(tokens
            .iter()
            .filter(|t| &t.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserTokenRepository for InMemoryUserTokenRepository {
    async fn generate(&self, user_id: &UserId) -> Result<UserToken, UserTokenRepositoryError> {
        let token = UserToken {
            id: Uuid::new_v4(),
            token: Uuid::new_v4(),
            user_id: user_id.clone(),
            created_at: self.clock.utc(),
        };
        lock_store(&self.tokens, UserTokenRepositoryError::query)?.push(token.clone());
        Ok(token)
    }

    async fn find_by_token(
        &self,
        token: &Uuid,
    ) -> Result<Option<UserToken>, UserTokenRepositoryError> {
        let tokens = lock_store(&self.tokens, UserTokenRepositoryError::query)?;
        Ok(tokens.iter().find(|t| &t.token == token).cloned())
    }

    async fn delete(&self, token_id: &Uuid) -> Result<(), UserTokenRepositoryError> {
        lock_store(&self.tokens, UserTokenRepositoryError::query)?.retain(|t| &t.id != token_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixed_clock, fixture_now};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn tokens_are_single_use() {
        let repo = InMemoryUserTokenRepository::new(fixed_clock(fixture_now()));
        let user = UserId::random();

        let issued = repo.generate(&user).await.expect("generate");
        assert_eq!(issued.created_at, fixture_now());
        assert_eq!(
            repo.find_by_token(&issued.token).await.expect("find"),
            Some(issued.clone())
        );

        repo.delete(&issued.id).await.expect("delete");
        assert!(repo.find_by_token(&issued.token).await.expect("find").is_none());
        assert!(repo.issued_to(&user).expect("list").is_empty());
    }
}
