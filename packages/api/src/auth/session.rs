//! Session keys shared by the web layer.

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// One-shot error message shown on the next page view.
pub const SESSION_FLASH_ERROR_KEY: &str = "flash_error";
