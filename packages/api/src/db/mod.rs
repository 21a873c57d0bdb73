//! # Account persistence
//!
//! Every route reaches the `users` table through the [`AccountStore`] trait so the
//! same handlers run against PostgreSQL in production ([`PgAccountStore`]) and
//! against [`MemoryAccountStore`] in tests.
//!
//! | Method | Purpose |
//! |--------|---------|
//! | [`find`](AccountStore::find) | Load an account by id (session lookup). |
//! | [`find_by_email`](AccountStore::find_by_email) | Login and duplicate checks. |
//! | [`create`](AccountStore::create) | Registration. |
//! | [`set_tahvel_cookie`](AccountStore::set_tahvel_cookie) | Overwrite the stored Tahvel cookie. |
//! | [`consume_tahvel_cookie`](AccountStore::consume_tahvel_cookie) | Atomically take the stored cookie and clear it. |
//!
//! [`connect`] opens the PostgreSQL pool from [`crate::settings::Database`].

mod memory;
mod postgres;

pub use memory::MemoryAccountStore;
pub use postgres::{connect, PgAccountStore};

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("an account with this email already exists")]
    DuplicateEmail,
    #[error("account {0} not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Replace the stored cookie.
    async fn set_tahvel_cookie(&self, id: Uuid, cookie: &str) -> Result<(), StoreError>;

    /// One-shot read: returns the cookie that was stored and leaves `NULL` behind.
    ///
    /// Two concurrent calls never both observe the same cookie.
    async fn consume_tahvel_cookie(&self, id: Uuid) -> Result<Option<String>, StoreError>;
}
