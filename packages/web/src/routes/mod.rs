//! HTTP handlers, one module per page group.

pub mod auth;
pub mod cookie;
pub mod dashboard;
pub mod timetable;

use tahvel_api::tahvel::FetchError;

use crate::view::View;

pub async fn home() -> View {
    View::new("Welcome", "/")
}

/// Collapse a fetch result into an optional prop. Upstream failures are expected
/// (expired cookies) and only logged.
fn ok_or_log<T>(what: &str, result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_missing_prerequisite() => {
            tracing::debug!("skipped Tahvel {}: {}", what, e);
            None
        }
        Err(e) => {
            tracing::info!("Tahvel {} unavailable: {}", what, e);
            None
        }
    }
}
