//! Local email + password authentication.
//!
//! Session handling lives in the web crate; this module owns the rules:
//! password hashing ([`hash_password`], [`verify_password`]) and the
//! [`register`] / [`login`] flows against an [`AccountStore`](crate::db::AccountStore).

mod account;
mod password;
mod session;

pub use account::{login, register, AuthError};
pub use password::{hash_password, verify_password, PasswordError};
pub use session::{SESSION_FLASH_ERROR_KEY, SESSION_USER_ID_KEY};
