//! Liveness and readiness checks.

use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use crate::state::AppState;

/// Liveness check. Always answers `ok` while the process is serving.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness check.
///
/// Returns 200 if the provider's auth API answers its health endpoint,
/// 503 otherwise.
#[instrument(skip(state))]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.auth().health().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Provider health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
