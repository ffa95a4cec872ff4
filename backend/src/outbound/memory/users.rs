//! In-memory `UserRepository`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId, UserParts};

use super::lock_store;

pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            clock,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut users = lock_store(&self.users, UserPersistenceError::query)?;
        if users.iter().any(|existing| existing.email() == &user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let now = self.clock.utc();
        let stored = User::from(UserParts {
            id: UserId::random(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            avatar: None,
            created_at: now,
            updated_at: now,
        });
        users.push(stored.clone());
        Ok(stored)
    }

    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = lock_store(&self.users, UserPersistenceError::query)?;
        if users
            .iter()
            .any(|other| other.id() != user.id() && other.email() == user.email())
        {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        let slot = users
            .iter_mut()
            .find(|existing| existing.id() == user.id())
            .ok_or_else(|| UserPersistenceError::query("record not found"))?;
        *slot = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = lock_store(&self.users, UserPersistenceError::query)?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = lock_store(&self.users, UserPersistenceError::query)?;
        Ok(users.iter().find(|user| user.email() == email).cloned())
    }

    async fn find_all_providers(
        &self,
        except_user_id: &UserId,
    ) -> Result<Vec<User>, UserPersistenceError> {
        let users = lock_store(&self.users, UserPersistenceError::query)?;
        Ok(users
            .iter()
            .filter(|user| user.id() != except_user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserName;
    use crate::test_support::{fixed_clock, fixture_now};
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new(fixed_clock(fixture_now()))
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: UserName::new("John Doe").expect("valid name"),
            email: EmailAddress::new(email).expect("valid email"),
            password_hash: "hash".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn created_users_are_found_by_id_and_email(repo: InMemoryUserRepository) {
        let user = repo.create(new_user("john@example.com")).await.expect("create");

        let by_id = repo.find_by_id(user.id()).await.expect("find");
        let by_email = repo.find_by_email(user.email()).await.expect("find");

        assert_eq!(by_id.as_ref(), Some(&user));
        assert_eq!(by_email, Some(user.clone()));
        assert_eq!(user.created_at(), fixture_now());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(repo: InMemoryUserRepository) {
        repo.create(new_user("john@example.com")).await.expect("create");
        let error = repo
            .create(new_user("JOHN@example.com"))
            .await
            .expect_err("duplicate");
        assert!(matches!(error, UserPersistenceError::DuplicateEmail { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn providers_exclude_the_caller_in_creation_order(repo: InMemoryUserRepository) {
        let first = repo.create(new_user("a@example.com")).await.expect("create");
        let second = repo.create(new_user("b@example.com")).await.expect("create");
        let third = repo.create(new_user("c@example.com")).await.expect("create");

        let providers = repo.find_all_providers(second.id()).await.expect("list");

        assert_eq!(providers, vec![first, third]);
    }

    #[rstest]
    #[tokio::test]
    async fn save_replaces_the_stored_user(repo: InMemoryUserRepository) {
        let mut user = repo.create(new_user("john@example.com")).await.expect("create");
        user.set_avatar("avatar.png".to_owned(), fixture_now());

        repo.save(&user).await.expect("save");

        let stored = repo.find_by_id(user.id()).await.expect("find");
        let avatar = stored.and_then(|u| u.avatar().map(str::to_owned));
        assert_eq!(avatar.as_deref(), Some("avatar.png"));
    }
}
