//! # Web crate: axum server for the Tahvel dashboard
//!
//! | Path | Handler | Auth |
//! |------|---------|------|
//! | `GET /` | [`routes::home`] | - |
//! | `GET /login` | [`routes::auth::login_page`] | - |
//! | `POST /register`, `POST /login` | [`routes::auth::register`], [`routes::auth::login`] | - |
//! | `POST /logout` | [`routes::auth::logout`] | session |
//! | `GET /api/auth/me` | [`routes::auth::me`] | - |
//! | `GET /dashboard` | [`routes::dashboard::dashboard`] | session |
//! | `GET /timetable[/{week}]` | [`routes::timetable::current_week`], [`routes::timetable::by_week`] | session |
//! | `GET /api/timetable[/{week}]` | [`routes::timetable::api_current_week`], [`routes::timetable::api_by_week`] | session |
//! | `PUT /save-tahvel-cookie` | [`routes::cookie::save`] | session |
//!
//! [`app`] wraps the router in the session and tracing layers; `main.rs` supplies a
//! PostgreSQL session store, tests supply `tower_sessions::MemoryStore`.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod view;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};

pub use state::AppState;

/// All routes, without session handling.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/login", get(routes::auth::login_page).post(routes::auth::login))
        .route("/register", post(routes::auth::register))
        .route("/logout", post(routes::auth::logout))
        .route("/api/auth/me", get(routes::auth::me))
        .route("/dashboard", get(routes::dashboard::dashboard))
        .route("/timetable", get(routes::timetable::current_week))
        .route("/timetable/{week}", get(routes::timetable::by_week))
        .route("/api/timetable", get(routes::timetable::api_current_week))
        .route("/api/timetable/{week}", get(routes::timetable::api_by_week))
        .route("/save-tahvel-cookie", put(routes::cookie::save))
        .with_state(state)
}

/// The router with the session layer backed by `session_store`.
pub fn app<S>(state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let server = &state.settings.server;
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(server.session_days)));

    router(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
