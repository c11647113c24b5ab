//! Session extractors.
//!
//! Pages require a provider session. The extractor reads the session cookies,
//! asks the provider who they belong to, and rejects the request when there
//! is no valid session.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::models::SessionTokens;
use crate::services::auth::Session;
use crate::state::AppState;

/// Where unauthenticated page requests are sent.
pub const LOGIN_PATH: &str = "/login";

/// Extractor that requires a valid provider session.
///
/// ```rust,ignore
/// async fn handler(RequireSession(session): RequireSession) -> impl IntoResponse {
///     format!("Hello, {}!", session.label())
/// }
/// ```
pub struct RequireSession(pub Session);

/// Rejection returned when no valid session is present.
///
/// Every session-guarded route is an HTML page, so the rejection always
/// redirects to the login page.
#[derive(Debug)]
pub struct SessionRejection;

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        Redirect::to(LOGIN_PATH).into_response()
    }
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let tokens = SessionTokens::from_headers(&parts.headers);
        match state.auth().get_session(tokens.as_ref()).await {
            Ok(Some(session)) => Ok(Self(session)),
            Ok(None) => Err(SessionRejection),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    status = ?e.provider_status(),
                    path = %parts.uri.path(),
                    "Session lookup rejected"
                );
                Err(SessionRejection)
            }
        }
    }
}
