//! Page-level fetch rules on top of [`TahvelApi`].
//!
//! The account-level methods (`profile`, `journals`, `timetable`) each resolve the
//! profile themselves. Pages that show several items fetch the profile once and use
//! the `*_for` variants, so a dashboard load costs one `/user` call.

use serde_json::Value;

use super::{FetchError, TahvelApi};
use crate::models::{RemoteProfile, User};
use crate::week::{self, DateRange};

pub struct Fetcher<'a> {
    api: &'a dyn TahvelApi,
    fallback_school_id: i64,
}

impl<'a> Fetcher<'a> {
    pub fn new(api: &'a dyn TahvelApi, fallback_school_id: i64) -> Self {
        Self {
            api,
            fallback_school_id,
        }
    }

    /// Check a raw cookie against `/user`, returning the profile it unlocks.
    pub async fn validate(&self, cookie: &str) -> Result<RemoteProfile, FetchError> {
        if cookie.trim().is_empty() {
            return Err(FetchError::MissingCookie);
        }
        self.api.user(cookie).await
    }

    pub async fn profile(&self, account: &User) -> Result<RemoteProfile, FetchError> {
        let cookie = account.tahvel_cookie().ok_or(FetchError::MissingCookie)?;
        self.api.user(cookie).await
    }

    pub async fn journals(&self, account: &User) -> Result<Value, FetchError> {
        let profile = self.profile(account).await?;
        self.journals_for(account, &profile).await
    }

    pub async fn journals_for(
        &self,
        account: &User,
        profile: &RemoteProfile,
    ) -> Result<Value, FetchError> {
        let cookie = account.tahvel_cookie().ok_or(FetchError::MissingCookie)?;
        let student = profile.student_id().ok_or(FetchError::MissingStudent)?;
        self.api.journal_tasks(cookie, student).await
    }

    /// Timetable for `range`, or for the current week when `range` is `None`.
    pub async fn timetable(
        &self,
        account: &User,
        range: Option<DateRange>,
    ) -> Result<Value, FetchError> {
        let profile = self.profile(account).await?;
        self.timetable_for(account, &profile, range).await
    }

    pub async fn timetable_for(
        &self,
        account: &User,
        profile: &RemoteProfile,
        range: Option<DateRange>,
    ) -> Result<Value, FetchError> {
        let cookie = account.tahvel_cookie().ok_or(FetchError::MissingCookie)?;
        let student = profile.student_id().ok_or(FetchError::MissingStudent)?;
        let school = profile.school_id_or(self.fallback_school_id);
        let range = range.unwrap_or_else(|| week::resolve(None).range());

        let result = self.api.timetable(cookie, school, student, &range).await;

        match &result {
            Err(FetchError::Status { status, body }) => {
                tracing::warn!(
                    status,
                    body = %body,
                    "Tahvel timetable API returned non-successful status"
                );
            }
            Err(e) if e.is_missing_prerequisite() => {}
            Err(e) => {
                tracing::error!(
                    student_id = student,
                    school_id = school,
                    from = %range.from_iso(),
                    thru = %range.thru_iso(),
                    "Tahvel timetable fetch failed: {}",
                    e
                );
            }
            Ok(_) => {}
        }

        result
    }
}
