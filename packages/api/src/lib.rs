//! # Tahvel dashboard: core library
//!
//! Everything the web server needs apart from HTTP plumbing: account storage,
//! authentication rules, the typed Tahvel client and the date logic behind the
//! timetable pages.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2id password hashing, register/login rules, session keys |
//! | [`cookie`] | Validate-then-store flow for a user's Tahvel cookie |
//! | [`db`] | [`AccountStore`](db::AccountStore) trait with PostgreSQL and in-memory implementations |
//! | [`models`] | Account rows (`User`, `UserInfo`) and the upstream `RemoteProfile` |
//! | [`settings`] | Layered configuration (`config.toml`, `APP__*` environment) |
//! | [`tahvel`] | One-method-per-endpoint client trait, reqwest client, page-level fetchers |
//! | [`week`] | ISO `YYYY-WW` tokens and Monday–Sunday date ranges |

pub mod auth;
pub mod cookie;
pub mod db;
pub mod models;
pub mod settings;
pub mod tahvel;
pub mod week;

pub use models::{RemoteProfile, User, UserInfo};
pub use settings::Settings;
