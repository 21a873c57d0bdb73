//! Timetable pages. The optional `{week}` segment is a `YYYY-WW` token; anything
//! that does not parse shows the current week.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tahvel_api::week;
use tahvel_api::User;
use tower_sessions::Session;

use super::ok_or_log;
use crate::error::AppError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::view::{flash_error, View};

pub const MISSING_PROFILE_MESSAGE: &str = "Please set your Tahvel cookie first";

pub async fn current_week(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    page(&state, &session, &user, None).await
}

pub async fn by_week(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Path(week): Path<String>,
) -> Result<Response, AppError> {
    page(&state, &session, &user, Some(&week)).await
}

async fn page(
    state: &AppState,
    session: &Session,
    user: &User,
    token: Option<&str>,
) -> Result<Response, AppError> {
    let fetcher = state.fetcher();

    let Some(profile) = ok_or_log("profile", fetcher.profile(user).await) else {
        flash_error(session, MISSING_PROFILE_MESSAGE).await?;
        return Ok(Redirect::to("/dashboard").into_response());
    };

    let week = week::resolve(token);
    let range = week.range();
    let timetable = ok_or_log(
        "timetable",
        fetcher.timetable_for(user, &profile, Some(range)).await,
    );

    let url = match token {
        Some(_) => format!("/timetable/{}", week.token()),
        None => "/timetable".to_string(),
    };

    Ok(View::new("Timetable", url)
        .prop("userData", &profile)
        .prop("timetable", &timetable)
        .prop("currentWeek", week.token().to_string())
        .prop("weekStart", range.from_iso())
        .prop("weekEnd", range.thru_iso())
        .prop("weekDisplay", week.display())
        .into_response())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableResponse {
    pub timetable: Option<Value>,
    pub week: String,
    pub week_display: String,
    pub from: String,
    pub thru: String,
}

pub async fn api_current_week(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Response {
    api(&state, &user, None).await
}

pub async fn api_by_week(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(week): Path<String>,
) -> Response {
    api(&state, &user, Some(&week)).await
}

async fn api(state: &AppState, user: &User, token: Option<&str>) -> Response {
    let fetcher = state.fetcher();

    let Some(profile) = ok_or_log("profile", fetcher.profile(user).await) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "No Tahvel data available" })),
        )
            .into_response();
    };

    let week = week::resolve(token);
    let range = week.range();
    let timetable = ok_or_log(
        "timetable",
        fetcher.timetable_for(user, &profile, Some(range)).await,
    );

    Json(TimetableResponse {
        timetable,
        week: week.token().to_string(),
        week_display: week.display(),
        from: range.from_iso(),
        thru: range.thru_iso(),
    })
    .into_response()
}
