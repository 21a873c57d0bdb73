use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tahvel_api::auth::{self, SESSION_USER_ID_KEY};
use tahvel_api::{User, UserInfo};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::view::View;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

async fn start_session(session: &Session, user: &User) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user.id).await?;
    Ok(())
}

pub async fn login_page() -> View {
    View::new("auth/Login", "/login")
}

pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<Json<UserInfo>, AppError> {
    let user = auth::register(
        state.accounts.as_ref(),
        &form.email,
        &form.password,
        &form.name,
    )
    .await?;

    start_session(&session, &user).await?;
    Ok(Json(user.to_info()))
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<UserInfo>, AppError> {
    let user = auth::login(state.accounts.as_ref(), &form.email, &form.password).await?;

    start_session(&session, &user).await?;
    Ok(Json(user.to_info()))
}

pub async fn logout(session: Session, _user: CurrentUser) -> Result<StatusCode, AppError> {
    session.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the current authenticated user from the session.
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Option<UserInfo>>, AppError> {
    let user_id: Option<Uuid> = session.get(SESSION_USER_ID_KEY).await?;

    let Some(user_id) = user_id else {
        return Ok(Json(None));
    };

    let user = state.accounts.find(user_id).await?;
    Ok(Json(user.map(|u| u.to_info())))
}
