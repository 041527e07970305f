//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::select;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{EmailAddress, NewUser, User, Username};

use super::error_mapping::{
    detect_unique_violation, diesel_error_message, pool_error_message, UniqueViolation,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_query_error(
    error: diesel::result::Error,
    context: &'static str,
) -> UserPersistenceError {
    UserPersistenceError::query(diesel_error_message(&error, context))
}

fn map_insert_error(error: diesel::result::Error) -> UserPersistenceError {
    match detect_unique_violation(&error) {
        Some(UniqueViolation::Email) => UserPersistenceError::duplicate_email(),
        Some(UniqueViolation::Username) => UserPersistenceError::duplicate_username(),
        _ => map_query_error(error, "user insert"),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, record: NewUser) -> Result<User, UserPersistenceError> {
        let row = NewUserRow {
            id: Uuid::new_v4(),
            username: record.username.as_ref(),
            email: record.email.as_ref(),
            password_hash: record.password_hash.as_str(),
            role: record.role.as_str(),
            first_name: record.first_name.as_ref(),
            last_name: record.last_name.as_ref(),
            created_at: Utc::now(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error)?;
        stored.into_domain()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_query_error(err, "user lookup"))?;
        row.map(UserRow::into_domain).transpose()
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        select(exists(
            users::table.filter(users::email.eq(email.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_query_error(err, "email existence check"))
    }
}
