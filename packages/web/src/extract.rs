//! Request extractors.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use tahvel_api::auth::SESSION_USER_ID_KEY;
use tahvel_api::User;
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// The signed-in account, loaded fresh from the store on every request.
///
/// Rejects anonymous requests with a redirect to `/login`, or with `401` for
/// paths under `/api/`.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let session = Session::from_request_parts(parts, &state)
            .await
            .map_err(IntoResponse::into_response)?;

        let user_id: Option<Uuid> = session
            .get(SESSION_USER_ID_KEY)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        let user = match user_id {
            Some(id) => state
                .accounts
                .find(id)
                .await
                .map_err(|e| AppError::from(e).into_response())?,
            None => None,
        };

        user.map(CurrentUser)
            .ok_or_else(|| unauthenticated(parts.uri.path()))
    }
}

fn unauthenticated(path: &str) -> Response {
    if path.starts_with("/api/") {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthenticated" })),
        )
            .into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}
