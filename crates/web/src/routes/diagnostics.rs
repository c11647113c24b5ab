//! Diagnostic JSON endpoints.
//!
//! Read-only snapshots of configuration for troubleshooting deployments.
//! Secret values are reported by presence, length, and a bounded preview
//! only (see [`crate::services::diagnostics`]).

use axum::{Json, extract::State, http::HeaderMap};
use serde::Serialize;
use tracing::instrument;

use crate::config::vars;
use crate::models::SessionTokens;
use crate::services::diagnostics::{EnvSnapshot, Sensitivity, VarReport};
use crate::state::AppState;

/// Response for `GET /api/debug-env`.
#[derive(Debug, Serialize)]
pub struct DebugEnvResponse {
    pub environment: &'static str,
    pub deployment: Option<String>,
    pub version: &'static str,
    pub variables: Vec<VarReport>,
}

/// Response for `GET /api/debug-auth`.
#[derive(Debug, Serialize)]
pub struct DebugAuthResponse {
    pub provider_host: Option<String>,
    pub anon_key: VarReport,
    /// Session cookie name to presence. Values are never included.
    pub cookies: serde_json::Map<String, serde_json::Value>,
}

/// Report which tracked variables are set.
#[instrument]
pub async fn env_check() -> Json<EnvSnapshot> {
    Json(EnvSnapshot::from_process())
}

/// Report the runtime environment alongside the tracked variables.
#[instrument(skip(state))]
pub async fn debug_env(State(state): State<AppState>) -> Json<DebugEnvResponse> {
    let config = state.config();

    Json(DebugEnvResponse {
        environment: config.environment.as_str(),
        deployment: config.deployment.clone(),
        version: env!("CARGO_PKG_VERSION"),
        variables: EnvSnapshot::from_process().variables,
    })
}

/// Report the provider configuration in use and which session cookies the
/// request carried.
#[instrument(skip_all)]
pub async fn debug_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<DebugAuthResponse> {
    let cookies = SessionTokens::presence(&headers)
        .into_iter()
        .map(|(name, present)| (name.to_string(), serde_json::Value::Bool(present)))
        .collect();

    Json(DebugAuthResponse {
        provider_host: state.auth().host().map(String::from),
        anon_key: VarReport::new(
            vars::SUPABASE_ANON_KEY,
            Some(state.config().supabase.anon_key.as_str()),
            Sensitivity::Public,
        ),
        cookies,
    })
}
