//! PostgreSQL-backed [`AccountStore`].

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{AccountStore, StoreError};
use crate::models::{NewUser, User};
use crate::settings::Database;

/// Open a connection pool for the configured database.
pub async fn connect(settings: &Database) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.url)
        .await
}

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as(
            "INSERT INTO users (id, email, name, password_hash) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::DuplicateEmail,
            e => StoreError::Database(e),
        })
    }

    async fn set_tahvel_cookie(&self, id: Uuid, cookie: &str) -> Result<(), StoreError> {
        let result =
            sqlx::query("UPDATE users SET tahvel_cookie = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(cookie)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn consume_tahvel_cookie(&self, id: Uuid) -> Result<Option<String>, StoreError> {
        // The row lock in the subquery serializes concurrent consumers.
        let row: Option<(Option<String>,)> = sqlx::query_as(
            r#"
            UPDATE users u
            SET tahvel_cookie = NULL, updated_at = NOW()
            FROM (SELECT id, tahvel_cookie FROM users WHERE id = $1 FOR UPDATE) old
            WHERE u.id = old.id
            RETURNING old.tahvel_cookie
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((cookie,)) => Ok(cookie),
            None => Err(StoreError::NotFound(id)),
        }
    }
}
