//! PostgreSQL-backed `UserTokenRepository` implementation using Diesel ORM.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{UserTokenRepository, UserTokenRepositoryError};
use crate::domain::{UserId, UserToken};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::{NewUserTokenRow, UserTokenRow};
use super::pool::{DbPool, PoolError};
use super::schema::user_tokens;

/// Diesel-backed implementation of the reset token repository port.
#[derive(Clone)]
pub struct DieselUserTokenRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserTokenRepository {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn pool_error(error: PoolError) -> UserTokenRepositoryError {
    map_pool_error(error, UserTokenRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserTokenRepositoryError {
    map_basic_diesel_error(
        error,
        UserTokenRepositoryError::query,
        UserTokenRepositoryError::connection,
    )
}

fn row_to_token(row: UserTokenRow) -> UserToken {
    UserToken {
        id: row.id,
        token: row.token,
        user_id: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
    }
}

#[async_trait]
impl UserTokenRepository for DieselUserTokenRepository {
    async fn generate(&self, user_id: &UserId) -> Result<UserToken, UserTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let now = self.clock.utc();
        let row = NewUserTokenRow {
            id: Uuid::new_v4(),
            token: Uuid::new_v4(),
            user_id: *user_id.as_uuid(),
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(user_tokens::table)
            .values(&row)
            .returning(UserTokenRow::as_returning())
            .get_result::<UserTokenRow>(&mut conn)
            .await
            .map(row_to_token)
            .map_err(diesel_error)
    }

    async fn find_by_token(
        &self,
        token: &Uuid,
    ) -> Result<Option<UserToken>, UserTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        user_tokens::table
            .filter(user_tokens::token.eq(token))
            .select(UserTokenRow::as_select())
            .first::<UserTokenRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_token))
            .map_err(diesel_error)
    }

    async fn delete(&self, token_id: &Uuid) -> Result<(), UserTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::delete(user_tokens::table.filter(user_tokens::id.eq(token_id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
