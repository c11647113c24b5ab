//! Authentication route handlers.
//!
//! Sign-in goes through the provider's password grant; the issued tokens are
//! stored in the session cookies. Sign-out revokes the session on the
//! provider when possible and always clears the cookies.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use familysync_core::Email;

use crate::error::{ApiError, capture, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::clear_session_cookies;
use crate::middleware::session::{
    REFRESH_TOKEN_MAX_AGE_SECONDS, append_cookie, removal_cookie, session_cookie,
};
use crate::models::{SessionTokens, cookie_names};
use crate::services::auth::TokenGrant;
use crate::state::AppState;

/// Returned to the client when sign-out cannot complete.
pub const LOGOUT_FAILED: &str = "Failed to logout";

/// Returned to the client when the session lookup fails.
pub const SESSION_FAILED: &str = "Failed to get session";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
///
/// No `Debug` derive: the password must not reach the logs.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

/// Friendly message for a `?error=` code on the login page.
#[must_use]
pub fn login_error_message(code: &str) -> &'static str {
    match code {
        "credentials" => "Incorrect email or password.",
        "invalid_email" => "Enter a valid email address.",
        "session" => "We couldn't start your session. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
}

// =============================================================================
// Sign-in
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(login_error_message),
    }
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let Ok(email) = Email::parse(&form.email) else {
        return Redirect::to("/login?error=invalid_email").into_response();
    };
    let password = SecretString::from(form.password);

    match state.auth().sign_in_with_password(&email, &password).await {
        Ok(grant) => {
            let headers = match grant_cookies(&grant, state.config().secure_cookies()) {
                Ok(headers) => headers,
                Err(e) => {
                    capture(&e);
                    return Redirect::to("/login?error=session").into_response();
                }
            };

            set_sentry_user(&grant.user.id, grant.user.email.as_deref());
            tracing::info!(user_id = %grant.user.id, "Signed in");

            (headers, Redirect::to("/dashboard")).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            Redirect::to("/login?error=credentials").into_response()
        }
    }
}

/// `Set-Cookie` headers storing a fresh token grant.
///
/// A grant without a refresh token removes any refresh cookie left over
/// from an earlier session.
fn grant_cookies(
    grant: &TokenGrant,
    secure: bool,
) -> Result<HeaderMap, axum::http::header::InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    append_cookie(
        &mut headers,
        &session_cookie(
            cookie_names::ACCESS_TOKEN,
            grant.access_token.expose_secret().to_string(),
            grant.expires_in,
            secure,
        ),
    )?;
    if let Some(refresh_token) = &grant.refresh_token {
        append_cookie(
            &mut headers,
            &session_cookie(
                cookie_names::REFRESH_TOKEN,
                refresh_token.expose_secret().to_string(),
                REFRESH_TOKEN_MAX_AGE_SECONDS,
                secure,
            ),
        )?;
    } else {
        append_cookie(&mut headers, &removal_cookie(cookie_names::REFRESH_TOKEN, secure))?;
    }
    Ok(headers)
}

// =============================================================================
// API
// =============================================================================

/// End the current session.
///
/// The provider is asked to revoke the session, but its answer does not
/// decide the outcome: the cookies are cleared regardless, so the browser
/// is signed out even when the provider is unreachable.
///
/// # Errors
///
/// Returns 500 `{"error": "Failed to logout"}` only if the clearing
/// cookies cannot be produced.
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = SessionTokens::from_headers(&headers);

    if let Err(e) = state.auth().sign_out(tokens.as_ref()).await {
        tracing::warn!(
            error = %e,
            status = ?e.provider_status(),
            "Provider sign-out failed, clearing cookies anyway"
        );
    }

    let cookies = clear_session_cookies(state.config().secure_cookies()).map_err(|e| {
        capture(&e);
        ApiError::internal(LOGOUT_FAILED)
    })?;

    clear_sentry_user();

    Ok((cookies, Json(json!({ "message": "Logged out successfully" }))))
}

/// Return the current session, or `null` when signed out.
///
/// # Errors
///
/// Returns 500 `{"error": "Failed to get session"}` when the provider lookup
/// fails. The provider's message is logged, not returned.
#[instrument(skip_all)]
pub async fn session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let tokens = SessionTokens::from_headers(&headers);

    match state.auth().get_session(tokens.as_ref()).await {
        Ok(Some(session)) => Ok(Json(json!({
            "session": { "user": session.user, "expires_at": null }
        }))),
        Ok(None) => Ok(Json(json!({ "session": null }))),
        Err(e) => {
            tracing::warn!(error = %e, status = ?e.provider_status(), "Session lookup failed");
            Err(ApiError::internal(SESSION_FAILED))
        }
    }
}
