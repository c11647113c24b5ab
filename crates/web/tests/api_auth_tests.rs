//! Router tests for sign-in, sign-out and the session endpoint.

#![allow(clippy::unwrap_used)]

mod common;

use crate::common::{
    ACCESS_TOKEN, ANON_KEY, EMAIL, REFRESH_TOKEN, USER_ID, auth_user_json, body_json,
    create_test_app, get, get_with_session, post_with_session, set_cookies,
};

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{
    body_json as body_json_matcher, header as header_matcher, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_success_clears_both_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header_matcher("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .and(header_matcher("apikey", ANON_KEY))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_test_app(&server);
    let response = app
        .oneshot(post_with_session("/api/auth/logout"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("sb-access-token=;")));
    assert!(cookies.iter().any(|c| c.starts_with("sb-refresh-token=;")));
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));

    let json = body_json(response).await;
    assert_eq!(json, json!({ "message": "Logged out successfully" }));
}

#[tokio::test]
async fn test_logout_provider_failure_still_signs_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "msg": "database unavailable" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = create_test_app(&server);
    let response = app
        .oneshot(post_with_session("/api/auth/logout"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(set_cookies(&response).len(), 2);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_logout_without_session_skips_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_test_app(&server);
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(set_cookies(&response).len(), 2);
}

#[tokio::test]
async fn test_logout_requires_post() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let response = app.oneshot(get("/api/auth/logout")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn test_session_returns_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header_matcher("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_user_json()))
        .mount(&server)
        .await;

    let app = create_test_app(&server);
    let response = app
        .oneshot(get_with_session("/api/auth/session"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["session"]["user"]["id"], USER_ID);
    assert_eq!(json["session"]["user"]["email"], EMAIL);
    assert!(json["session"]["expires_at"].is_null());

    // Tokens are never echoed back
    let text = json.to_string();
    assert!(!text.contains(ACCESS_TOKEN));
    assert!(!text.contains(REFRESH_TOKEN));
}

#[tokio::test]
async fn test_session_without_cookies_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_user_json()))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_test_app(&server);
    let response = app.oneshot(get("/api/auth/session")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "session": null }));
}

#[tokio::test]
async fn test_session_provider_error_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "msg": "invalid JWT: token is expired" })),
        )
        .mount(&server)
        .await;

    let app = create_test_app(&server);
    let response = app
        .oneshot(get_with_session("/api/auth/session"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to get session" })
    );
}

// =============================================================================
// Sign-in
// =============================================================================

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "email={}&password={password}",
            email.replace('@', "%40")
        )))
        .unwrap()
}

#[tokio::test]
async fn test_login_success_sets_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(body_json_matcher(json!({ "email": EMAIL, "password": "correct-horse" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": REFRESH_TOKEN,
            "user": auth_user_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_test_app(&server);
    let response = app
        .oneshot(login_request(EMAIL, "correct-horse"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");

    let cookies = set_cookies(&response);
    let access_cookie = format!("sb-access-token={ACCESS_TOKEN}");
    assert!(
        cookies
            .iter()
            .any(|c| c.starts_with(&access_cookie) && c.contains("Max-Age=3600"))
    );
    assert!(
        cookies
            .iter()
            .any(|c| c.starts_with(&format!("sb-refresh-token={REFRESH_TOKEN}")))
    );
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let app = create_test_app(&server);
    let response = app.oneshot(login_request(EMAIL, "wrong")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/login?error=credentials"
    );
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_login_invalid_email_skips_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_test_app(&server);
    let response = app
        .oneshot(login_request("not-an-email", "whatever"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/login?error=invalid_email"
    );
}
