//! HTTP route handlers for FamilySync.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /dashboard
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (provider reachable)
//!
//! # Pages (require a session)
//! GET  /dashboard              - Dashboard with greeting
//! GET  /tasks                  - Tasks placeholder
//! GET  /events                 - Events placeholder
//! GET  /family                 - Family setup hints
//!
//! # Auth
//! GET  /login                  - Sign-in page
//! POST /auth/login             - Sign-in action
//!
//! # API
//! POST /api/auth/logout        - End the session, clear cookies
//! GET  /api/auth/session       - Current session as JSON
//! GET  /api/env-check          - Environment variable presence
//! GET  /api/debug-env          - Environment snapshot with build info
//! GET  /api/debug-auth         - Provider config and cookie presence
//! ```

pub mod auth;
pub mod diagnostics;
pub mod health;
pub mod pages;

use axum::{
    Router,
    http::Uri,
    middleware,
    response::Redirect,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Directory served under `/static`, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/web/static";

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        .route("/env-check", get(diagnostics::env_check))
        .route("/debug-env", get(diagnostics::debug_env))
        .route("/debug-auth", get(diagnostics::debug_auth))
}

/// Create all routes for the application, without middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(pages::router())
        .route("/login", get(auth::login_page))
        .route("/auth/login", post(auth::login))
        .nest("/api", api_routes())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Build the full application router with its middleware stack.
///
/// Sentry layers are added by the binary on top of this.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
