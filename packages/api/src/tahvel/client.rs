use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{FetchError, TahvelApi};
use crate::models::RemoteProfile;
use crate::settings;
use crate::week::DateRange;

/// reqwest-backed Tahvel client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct TahvelClient {
    http: Client,
    base_url: String,
    user_agent: String,
}

impl TahvelClient {
    pub fn new(settings: &settings::Tahvel) -> Result<Self, reqwest::Error> {
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            user_agent: settings.user_agent.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Accept any 2xx with a non-blank body and decode it.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl TahvelApi for TahvelClient {
    async fn user(&self, cookie: &str) -> Result<RemoteProfile, FetchError> {
        let response = self
            .http
            .get(self.url("/user"))
            .header(COOKIE, cookie)
            .send()
            .await?;

        read_json(response).await
    }

    async fn journal_tasks(&self, cookie: &str, student: i64) -> Result<Value, FetchError> {
        let student = student.to_string();
        let response = self
            .http
            .get(self.url("/journals/studentJournalTasks"))
            .header(COOKIE, cookie)
            .query(&[("presentTasks", "false"), ("studentId", student.as_str())])
            .send()
            .await?;

        read_json(response).await
    }

    async fn timetable(
        &self,
        cookie: &str,
        school: i64,
        student: i64,
        range: &DateRange,
    ) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(self.url(&format!("/timetableevents/timetableByStudent/{}", school)))
            .header(COOKIE, cookie)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("student", student.to_string()),
                ("from", range.from_iso()),
                ("thru", range.thru_iso()),
            ])
            .send()
            .await?;

        read_json(response).await
    }
}
