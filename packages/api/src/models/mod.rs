//! Data models for the application.

mod profile;
mod user;

pub use profile::RemoteProfile;
pub use user::{NewUser, User, UserInfo};
