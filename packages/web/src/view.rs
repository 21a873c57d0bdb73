//! Page payloads.
//!
//! Pages are not rendered server side. Each page handler returns a [`View`]: the
//! name of the client component plus its props, serialized as
//! `{"component", "props", "url"}`.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tahvel_api::auth::SESSION_FLASH_ERROR_KEY;
use tower_sessions::Session;

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct View {
    component: &'static str,
    props: Map<String, Value>,
    url: String,
}

impl View {
    pub fn new(component: &'static str, url: impl Into<String>) -> Self {
        Self {
            component,
            props: Map::new(),
            url: url.into(),
        }
    }

    /// Attach a prop; values that fail to serialize become `null`.
    pub fn prop(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::warn!(
                component = self.component,
                prop = key,
                "prop not serializable: {}",
                e
            );
            Value::Null
        });
        self.props.insert(key.to_string(), value);
        self
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Queue an error message for the next page view.
pub async fn flash_error(session: &Session, message: &str) -> Result<(), AppError> {
    session.insert(SESSION_FLASH_ERROR_KEY, message).await?;
    Ok(())
}

/// Take the queued error message, if any.
pub async fn take_flash_error(session: &Session) -> Result<Option<String>, AppError> {
    Ok(session.remove(SESSION_FLASH_ERROR_KEY).await?)
}
