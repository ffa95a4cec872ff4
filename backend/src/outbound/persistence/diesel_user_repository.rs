//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId, UserName, UserParts};

use super::diesel_error_mapping::{DieselErrorMap, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

/// Map Diesel errors; `email` names the address involved in an insert or
/// update so a unique violation can report it.
fn diesel_error(error: diesel::result::Error, email: &str) -> UserPersistenceError {
    map_diesel_error(
        error,
        DieselErrorMap {
            query: UserPersistenceError::query,
            connection: UserPersistenceError::connection,
            unique: || UserPersistenceError::duplicate_email(email),
        },
    )
}

fn read_error(error: diesel::result::Error) -> UserPersistenceError {
    diesel_error(error, "")
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        password,
        avatar,
        created_at,
        updated_at,
    } = row;
    let name = UserName::new(name).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let email =
        EmailAddress::new(email).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::from(UserParts {
        id: UserId::from_uuid(id),
        name,
        email,
        password_hash: password,
        avatar,
        created_at,
        updated_at,
    }))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let now = self.clock.utc();
        let row = NewUserRow {
            id: Uuid::new_v4(),
            name: user.name.as_ref(),
            email: user.email.as_ref(),
            password: &user.password_hash,
            avatar: None,
            created_at: now,
            updated_at: now,
        };

        let stored = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(|err| diesel_error(err, user.email.as_ref()))?;
        row_to_user(stored)
    }

    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = UserUpdate {
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            password: user.password_hash(),
            avatar: user.avatar(),
            updated_at: user.updated_at(),
        };

        let updated = diesel::update(users::table.filter(users::id.eq(user.id().as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| diesel_error(err, user.email().as_ref()))?;
        if updated == 0 {
            return Err(UserPersistenceError::query("record not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(read_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(read_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_all_providers(
        &self,
        except_user_id: &UserId,
    ) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::id.ne(except_user_id.as_uuid()))
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(read_error)?;
        rows.into_iter().map(row_to_user).collect()
    }
}
