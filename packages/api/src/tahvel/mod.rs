//! # Tahvel: typed access to the upstream school information system
//!
//! Tahvel has no API tokens; requests are authorised by replaying the browser
//! session cookie a user copied from their own Tahvel login. This module wraps the
//! three endpoints the dashboard needs behind the [`TahvelApi`] trait (one method
//! per endpoint) and layers the page-level fetch rules on top in [`Fetcher`].
//!
//! | Endpoint | Trait method |
//! |----------|--------------|
//! | `GET /user` | [`TahvelApi::user`] |
//! | `GET /journals/studentJournalTasks` | [`TahvelApi::journal_tasks`] |
//! | `GET /timetableevents/timetableByStudent/{school}` | [`TahvelApi::timetable`] |
//!
//! [`TahvelClient`] is the reqwest implementation used by the server.
//!
//! ## Failure model
//!
//! Every call returns `Result<_, FetchError>`. An expired cookie and an upstream
//! outage look the same from here (a non-2xx status or an empty body), so callers
//! treat every error as "no data" and render accordingly.

mod client;
mod fetch;
#[cfg(test)]
pub(crate) mod fake;

pub use client::TahvelClient;
pub use fetch::Fetcher;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::RemoteProfile;
use crate::week::DateRange;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no Tahvel cookie stored for this account")]
    MissingCookie,
    #[error("Tahvel profile has no student id")]
    MissingStudent,
    #[error("Tahvel responded with status {status}")]
    Status { status: u16, body: String },
    #[error("Tahvel returned an empty body")]
    EmptyBody,
    #[error("invalid JSON from Tahvel: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request to Tahvel failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// True when the request was never sent because local data was missing.
    pub fn is_missing_prerequisite(&self) -> bool {
        matches!(self, FetchError::MissingCookie | FetchError::MissingStudent)
    }
}

/// One method per upstream endpoint. `cookie` is sent verbatim.
#[async_trait]
pub trait TahvelApi: Send + Sync {
    async fn user(&self, cookie: &str) -> Result<RemoteProfile, FetchError>;

    async fn journal_tasks(&self, cookie: &str, student: i64) -> Result<Value, FetchError>;

    async fn timetable(
        &self,
        cookie: &str,
        school: i64,
        student: i64,
        range: &DateRange,
    ) -> Result<Value, FetchError>;
}
