use axum::{extract::State, response::Redirect, Json};
use serde::Deserialize;
use tahvel_api::cookie::save_tahvel_cookie;

use crate::error::AppError;
use crate::extract::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CookieForm {
    #[serde(default)]
    pub tahvel_cookie: String,
}

/// `PUT /save-tahvel-cookie`
pub async fn save(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(form): Json<CookieForm>,
) -> Result<Redirect, AppError> {
    save_tahvel_cookie(
        &state.fetcher(),
        state.accounts.as_ref(),
        user.id,
        &form.tahvel_cookie,
    )
    .await?;

    Ok(Redirect::to("/dashboard"))
}
