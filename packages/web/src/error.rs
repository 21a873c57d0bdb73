use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tahvel_api::auth::{AuthError, PasswordError};
use tahvel_api::cookie::{CookieUpdateError, COOKIE_FIELD};
use tahvel_api::db::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Field-level input error, answered with 422.
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation { field, message } => AppError::Validation {
                field,
                message: message.to_string(),
            },
            AuthError::InvalidCredentials => AppError::Validation {
                field: "email",
                message: e.to_string(),
            },
            AuthError::Password(e) => AppError::Password(e),
            AuthError::Store(e) => AppError::Store(e),
        }
    }
}

impl From<CookieUpdateError> for AppError {
    fn from(e: CookieUpdateError) -> Self {
        match e {
            CookieUpdateError::Invalid(_) => AppError::Validation {
                field: COOKIE_FIELD,
                message: e.to_string(),
            },
            CookieUpdateError::Store(e) => AppError::Store(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation { field, message } => {
                let body = json!({
                    "message": message,
                    "errors": { field: [message] },
                });
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            e => {
                tracing::error!("{}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
