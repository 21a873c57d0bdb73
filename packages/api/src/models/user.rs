//! # Account model
//!
//! Two representations of a signed-in account:
//!
//! ## [`User`]
//!
//! The complete row from the `users` table, loaded through [`sqlx::FromRow`]:
//!
//! - `id`: primary key (`UUID v4`).
//! - `email`, `name`: set at registration.
//! - `password_hash`: Argon2id PHC string.
//! - `tahvel_cookie`: the Tahvel session cookie last accepted by the cookie form,
//!   or `NULL` when none is stored (or it was consumed).
//! - `created_at` / `updated_at`: audit timestamps.
//!
//! ## [`UserInfo`]
//!
//! What the browser is allowed to see: no hash, and the cookie reduced to a
//! `has_tahvel_cookie` flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full account record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub tahvel_cookie: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The stored Tahvel cookie, if one is set and non-blank.
    pub fn tahvel_cookie(&self) -> Option<&str> {
        self.tahvel_cookie
            .as_deref()
            .filter(|cookie| !cookie.trim().is_empty())
    }

    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
            has_tahvel_cookie: self.tahvel_cookie().is_some(),
        }
    }
}

/// Fields required to insert an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub has_tahvel_cookie: bool,
}
