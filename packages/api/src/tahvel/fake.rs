//! Scripted [`TahvelApi`] for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{FetchError, TahvelApi};
use crate::models::{RemoteProfile, User};
use crate::week::DateRange;

/// Unset payloads answer like a rejecting upstream: `/user` with 401, the
/// data endpoints with 500.
#[derive(Default)]
pub(crate) struct FakeTahvel {
    pub profile: Option<Value>,
    pub journals: Option<Value>,
    pub timetable: Option<Value>,
    calls: Mutex<Vec<String>>,
}

impl FakeTahvel {
    pub fn with_profile(profile: Value) -> Self {
        Self {
            profile: Some(profile),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn reply<T: serde::de::DeserializeOwned>(payload: &Option<Value>, status: u16) -> Result<T, FetchError> {
    match payload {
        Some(value) => Ok(serde_json::from_value(value.clone())?),
        None => Err(FetchError::Status {
            status,
            body: String::new(),
        }),
    }
}

#[async_trait]
impl TahvelApi for FakeTahvel {
    async fn user(&self, cookie: &str) -> Result<RemoteProfile, FetchError> {
        self.record(format!("user {}", cookie));
        reply(&self.profile, 401)
    }

    async fn journal_tasks(&self, cookie: &str, student: i64) -> Result<Value, FetchError> {
        self.record(format!("journal_tasks {} student={}", cookie, student));
        reply(&self.journals, 500)
    }

    async fn timetable(
        &self,
        cookie: &str,
        school: i64,
        student: i64,
        range: &DateRange,
    ) -> Result<Value, FetchError> {
        self.record(format!(
            "timetable {} school={} student={} from={} thru={}",
            cookie,
            school,
            student,
            range.from_iso(),
            range.thru_iso()
        ));
        reply(&self.timetable, 500)
    }
}

pub(crate) fn account(cookie: Option<&str>) -> User {
    User {
        id: Uuid::new_v4(),
        email: "mari@example.com".into(),
        name: Some("Mari".into()),
        password_hash: "hash".into(),
        tahvel_cookie: cookie.map(String::from),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
