//! Saving a user's Tahvel cookie.
//!
//! A submitted cookie is only stored after Tahvel accepts it: one `/user` round
//! trip, then one write. A rejected cookie leaves the previously stored value in
//! place.

use uuid::Uuid;

use crate::db::{AccountStore, StoreError};
use crate::models::RemoteProfile;
use crate::tahvel::{FetchError, Fetcher};

/// Form field the validation error is reported against.
pub const COOKIE_FIELD: &str = "tahvel_cookie";

pub const INVALID_COOKIE_MESSAGE: &str =
    "Invalid Tahvel Cookie. Please make sure you copied the entire cookie value.";

#[derive(Debug, thiserror::Error)]
pub enum CookieUpdateError {
    #[error("{}", INVALID_COOKIE_MESSAGE)]
    Invalid(#[source] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validate `raw_cookie` against Tahvel and persist it on success.
///
/// The cookie is stored exactly as submitted.
pub async fn save_tahvel_cookie(
    fetcher: &Fetcher<'_>,
    store: &dyn AccountStore,
    account_id: Uuid,
    raw_cookie: &str,
) -> Result<RemoteProfile, CookieUpdateError> {
    let profile = match fetcher.validate(raw_cookie).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::info!(user_id = %account_id, "rejected Tahvel cookie: {}", e);
            return Err(CookieUpdateError::Invalid(e));
        }
    };

    store.set_tahvel_cookie(account_id, raw_cookie).await?;
    tracing::info!(user_id = %account_id, "stored Tahvel cookie");

    Ok(profile)
}
