//! Shared harness: the real router over an in-memory account store, an in-memory
//! session store and a scripted Tahvel.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use tahvel_api::auth::SESSION_USER_ID_KEY;
use tahvel_api::db::{AccountStore, MemoryAccountStore};
use tahvel_api::models::NewUser;
use tahvel_api::tahvel::{FetchError, TahvelApi};
use tahvel_api::week::DateRange;
use tahvel_api::{RemoteProfile, Settings, User};
use tahvel_web::AppState;
use tower::ServiceExt;
use tower_sessions::session::{Id, Record};
use tower_sessions::{MemoryStore, SessionStore};

/// Scripted upstream. Unset payloads answer like a rejecting Tahvel.
#[derive(Default)]
pub struct FakeTahvel {
    pub profile: Mutex<Option<Value>>,
    pub journals: Mutex<Option<Value>>,
    pub timetable: Mutex<Option<Value>>,
    calls: Mutex<Vec<String>>,
}

impl FakeTahvel {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_profile(&self, profile: Value) {
        *self.profile.lock().unwrap() = Some(profile);
    }

    pub fn set_journals(&self, journals: Value) {
        *self.journals.lock().unwrap() = Some(journals);
    }

    pub fn set_timetable(&self, timetable: Value) {
        *self.timetable.lock().unwrap() = Some(timetable);
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn reply<T: serde::de::DeserializeOwned>(
    payload: &Mutex<Option<Value>>,
    status: u16,
) -> Result<T, FetchError> {
    match payload.lock().unwrap().clone() {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Err(FetchError::Status {
            status,
            body: "rejected".into(),
        }),
    }
}

/// Lets the test keep a handle while the app owns the trait object.
pub struct SharedTahvel(pub Arc<FakeTahvel>);

#[async_trait]
impl TahvelApi for SharedTahvel {
    async fn user(&self, cookie: &str) -> Result<RemoteProfile, FetchError> {
        self.0.record(format!("user {}", cookie));
        reply(&self.0.profile, 500)
    }

    async fn journal_tasks(&self, cookie: &str, student: i64) -> Result<Value, FetchError> {
        self.0.record(format!("journal_tasks {} student={}", cookie, student));
        reply(&self.0.journals, 500)
    }

    async fn timetable(
        &self,
        cookie: &str,
        school: i64,
        student: i64,
        range: &DateRange,
    ) -> Result<Value, FetchError> {
        self.0.record(format!(
            "timetable {} school={} student={} from={} thru={}",
            cookie,
            school,
            student,
            range.from_iso(),
            range.thru_iso()
        ));
        reply(&self.0.timetable, 500)
    }
}

pub struct TestApp {
    pub router: Router,
    pub accounts: MemoryAccountStore,
    pub sessions: MemoryStore,
    pub tahvel: Arc<FakeTahvel>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(Settings::defaults().unwrap())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let accounts = MemoryAccountStore::new();
        let sessions = MemoryStore::default();
        let tahvel = Arc::new(FakeTahvel::default());

        let state = AppState::new(settings, accounts.clone(), SharedTahvel(tahvel.clone()));
        let router = tahvel_web::app(state, sessions.clone());

        Self {
            router,
            accounts,
            sessions,
            tahvel,
        }
    }

    /// Insert an account without going through password hashing.
    pub async fn account(&self, cookie: Option<&str>) -> User {
        let user = self
            .accounts
            .create(NewUser {
                email: format!("{}@example.com", uuid::Uuid::new_v4()),
                name: "Mari".into(),
                password_hash: "unused".into(),
            })
            .await
            .unwrap();
        if let Some(cookie) = cookie {
            self.accounts.set_tahvel_cookie(user.id, cookie).await.unwrap();
        }
        self.stored(&user).await
    }

    pub async fn stored(&self, user: &User) -> User {
        self.accounts.find(user.id).await.unwrap().unwrap()
    }

    /// A `Cookie` header value for a session already signed in as `user`.
    pub async fn sign_in(&self, user: &User) -> String {
        let mut record = Record {
            id: Id::default(),
            data: HashMap::from([(
                SESSION_USER_ID_KEY.to_string(),
                serde_json::to_value(user.id).unwrap(),
            )]),
            expiry_date: time::OffsetDateTime::now_utc() + time::Duration::hours(1),
        };
        self.sessions.create(&mut record).await.unwrap();
        format!("id={}", record.id)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(session) = session {
            builder = builder.header(header::COOKIE, session);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str, session: &str) -> Response<Body> {
        self.request(Method::GET, uri, Some(session), None).await
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// The `name=value` part of the session cookie set on `response`.
pub fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("response sets a session cookie");
    set_cookie.split(';').next().unwrap().to_string()
}

pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}
