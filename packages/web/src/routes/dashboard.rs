use axum::extract::State;
use serde_json::json;
use tower_sessions::Session;

use super::ok_or_log;
use crate::error::AppError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::view::{take_flash_error, View};

/// Profile, journal tasks and this week's timetable. Calls are sequential and
/// share one profile lookup; any of them may come back `null`.
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
) -> Result<View, AppError> {
    let fetcher = state.fetcher();

    let profile = ok_or_log("profile", fetcher.profile(&user).await);

    let (journals, timetable) = match &profile {
        Some(profile) => (
            ok_or_log("journals", fetcher.journals_for(&user, profile).await),
            ok_or_log("timetable", fetcher.timetable_for(&user, profile, None).await),
        ),
        None => (None, None),
    };

    if profile.is_some() && state.settings.tahvel.single_use_cookie {
        state.accounts.consume_tahvel_cookie(user.id).await?;
    }

    let flash_error = take_flash_error(&session).await?;

    Ok(View::new("Dashboard", "/dashboard")
        .prop("userData", &profile)
        .prop("journals", &journals)
        .prop("timetable", &timetable)
        .prop("flash", json!({ "error": flash_error })))
}
