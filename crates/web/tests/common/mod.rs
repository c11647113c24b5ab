//! Shared helpers for router tests.
//!
//! Each test gets its own mock provider; the app under test is configured to
//! talk to it instead of a real hosted project.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use familysync_web::config::{AppConfig, vars};
use familysync_web::routes::build_router;
use familysync_web::state::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const USER_ID: &str = "7f6c1c8e-1f5a-4c1b-9a57-3f0d4f0b8e21";
pub const FAMILY_ID: &str = "0b4a2f1e-58d3-4e9a-8f53-8c2a3b6f9d10";
pub const EMAIL: &str = "alex@example.com";
pub const ACCESS_TOKEN: &str = "access-token-abc123";
pub const REFRESH_TOKEN: &str = "refresh-token-def456";
pub const ANON_KEY: &str = "anon-public-key";

/// `Cookie` header carrying both session tokens.
pub fn session_cookie_header() -> String {
    format!("sb-access-token={ACCESS_TOKEN}; sb-refresh-token={REFRESH_TOKEN}")
}

pub fn test_config(provider_url: &str) -> AppConfig {
    let env: HashMap<&str, String> = HashMap::from([
        (vars::SUPABASE_URL, provider_url.to_string()),
        (vars::SUPABASE_ANON_KEY, ANON_KEY.to_string()),
        (vars::ENV, "test".to_string()),
    ]);
    AppConfig::from_lookup(|key| env.get(key).cloned()).unwrap()
}

pub fn create_test_app(server: &MockServer) -> Router {
    let state = AppState::new(test_config(&server.uri())).unwrap();
    build_router(state)
}

/// Provider `/auth/v1/user` body for the test user.
pub fn auth_user_json() -> Value {
    json!({
        "id": USER_ID,
        "aud": "authenticated",
        "role": "authenticated",
        "email": EMAIL,
        "created_at": "2025-01-04T09:30:00Z",
        "last_sign_in_at": "2025-03-01T18:12:44Z"
    })
}

/// Provider `/rest/v1/users` row for the test user.
pub fn profile_row_json(name: &str) -> Value {
    json!({
        "id": USER_ID,
        "family_id": FAMILY_ID,
        "email": EMAIL,
        "name": name,
        "role": "parent",
        "color": "green",
        "is_active": true,
        "created_at": "2025-01-04T09:30:00Z",
        "updated_at": "2025-02-11T12:00:00Z",
        "last_seen": null,
        "family": { "id": FAMILY_ID, "name": "The Riveras" }
    })
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_session(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, session_cookie_header())
        .body(Body::empty())
        .unwrap()
}

pub fn post_with_session(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, session_cookie_header())
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// All `Set-Cookie` values on a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}
