//! Client for the hosted auth/database provider.
//!
//! Wraps the provider's auth API (`/auth/v1`) and data API (`/rest/v1`).
//! Every call is a single request; there are no retries and nothing is
//! cached.
//!
//! # Example
//!
//! ```rust,ignore
//! let auth = AuthService::new(&config.supabase)?;
//!
//! // Look up the session carried by the request cookies
//! let tokens = SessionTokens::from_headers(request.headers());
//! if let Some(session) = auth.get_session(tokens.as_ref()).await? {
//!     let profile = auth.fetch_profile(&session).await?;
//! }
//! ```

mod error;
mod types;

pub use error::AuthError;
pub use types::{AuthUser, Session, TokenGrant};

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use familysync_core::{Email, UserProfile};

use crate::config::SupabaseConfig;
use crate::models::SessionTokens;
use types::TokenResponse;

/// Timeout applied to every provider request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Columns selected for profile lookups, embedding the owning family.
const PROFILE_SELECT: &str = "*,family:families(id,name)";

/// Provider API client.
///
/// Cheap to clone; the underlying HTTP connection pool is shared.
#[derive(Clone)]
pub struct AuthService {
    inner: Arc<AuthServiceInner>,
}

struct AuthServiceInner {
    client: reqwest::Client,
    base_url: Url,
}

impl AuthService {
    /// Create a new provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if the anon key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, AuthError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.anon_key)
                .map_err(|e| AuthError::InvalidApiKey(e.to_string()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("familysync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // `Url::join` drops the last path segment unless the base ends in '/'
        let mut base_url = config.url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            inner: Arc::new(AuthServiceInner { client, base_url }),
        })
    }

    /// Provider host, for diagnostics.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.inner.base_url.host_str()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sessions
    // ─────────────────────────────────────────────────────────────────────────

    /// Retrieve the session for the given tokens.
    ///
    /// Returns `Ok(None)` when there are no tokens. Otherwise asks the
    /// provider who the access token belongs to and returns the tokens
    /// unchanged alongside that user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] carrying the provider's message when it
    /// rejects the token, or a transport/decode error.
    pub async fn get_session(
        &self,
        tokens: Option<&SessionTokens>,
    ) -> Result<Option<Session>, AuthError> {
        let Some(tokens) = tokens else {
            return Ok(None);
        };

        let response = self
            .inner
            .client
            .get(self.endpoint("auth/v1/user")?)
            .bearer_auth(tokens.access_token.expose_secret())
            .send()
            .await?;

        let user: AuthUser = decode(response).await?;

        Ok(Some(Session {
            tokens: tokens.clone(),
            user,
        }))
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] when the provider rejects the
    /// credentials.
    pub async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<TokenGrant, AuthError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let body = serde_json::json!({
            "email": email.as_str(),
            "password": password.expose_secret(),
        });

        let response = self.inner.client.post(url).json(&body).send().await?;
        let raw: TokenResponse = decode(response).await?;

        Ok(raw.into())
    }

    /// Revoke the session on the provider side.
    ///
    /// Without tokens there is nothing to revoke and this succeeds
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] when the provider refuses the sign-out.
    pub async fn sign_out(&self, tokens: Option<&SessionTokens>) -> Result<(), AuthError> {
        let Some(tokens) = tokens else {
            return Ok(());
        };

        let response = self
            .inner
            .client
            .post(self.endpoint("auth/v1/logout")?)
            .bearer_auth(tokens.access_token.expose_secret())
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Data API
    // ─────────────────────────────────────────────────────────────────────────

    /// Load the signed-in member's profile, with their family embedded.
    ///
    /// Runs as the member (bearer token), so row-level security applies.
    /// Returns `Ok(None)` when no profile row exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the query or the row does not
    /// match [`UserProfile`].
    pub async fn fetch_profile(&self, session: &Session) -> Result<Option<UserProfile>, AuthError> {
        let mut url = self.endpoint("rest/v1/users")?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{}", session.user.id))
            .append_pair("select", PROFILE_SELECT)
            .append_pair("limit", "1");

        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(session.tokens.access_token.expose_secret())
            .header("Accept", "application/json")
            .send()
            .await?;

        let rows: Vec<UserProfile> = decode(response).await?;
        Ok(rows.into_iter().next())
    }

    /// Check that the provider's auth API is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the health endpoint does not answer successfully.
    pub async fn health(&self) -> Result<(), AuthError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("auth/v1/health")?)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        Ok(self.inner.base_url.join(path)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response handling
// ─────────────────────────────────────────────────────────────────────────────

/// Pass successful responses through; turn anything else into
/// [`AuthError::Provider`].
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AuthError::Provider {
        status: status.as_u16(),
        message: provider_message(status, &body),
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AuthError> {
    ensure_success(response)
        .await?
        .json()
        .await
        .map_err(|e| AuthError::Decode(e.to_string()))
}

/// Extract the human-readable message from a provider error body.
///
/// The auth API uses `msg` or `error_description`, the data API uses
/// `message`, and older endpoints only send `error`. Non-JSON bodies are
/// returned as-is; an empty body falls back to the status reason.
fn provider_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) {
        let found = ["msg", "message", "error_description", "error"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(serde_json::Value::as_str));
        if let Some(message) = found {
            return message.to_string();
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown provider error")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn test_provider_message_prefers_msg() {
        let body = r#"{"code":401,"error_code":"bad_jwt","msg":"invalid JWT: token is expired"}"#;
        assert_eq!(
            provider_message(StatusCode::UNAUTHORIZED, body),
            "invalid JWT: token is expired"
        );
    }

    #[test]
    fn test_provider_message_data_api_shape() {
        let body = r#"{"code":"42501","message":"permission denied for table users"}"#;
        assert_eq!(
            provider_message(StatusCode::FORBIDDEN, body),
            "permission denied for table users"
        );
    }

    #[test]
    fn test_provider_message_oauth_shape() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            provider_message(StatusCode::BAD_REQUEST, body),
            "Invalid login credentials"
        );
    }

    #[test]
    fn test_provider_message_plain_text_and_empty() {
        assert_eq!(
            provider_message(StatusCode::BAD_GATEWAY, "upstream timed out\n"),
            "upstream timed out"
        );
        assert_eq!(
            provider_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
    }

    #[test]
    fn test_provider_error_display_is_verbatim() {
        let err = AuthError::Provider {
            status: 401,
            message: "Auth session missing!".to_string(),
        };
        assert_eq!(err.to_string(), "Auth session missing!");
        assert_eq!(err.provider_status(), Some(401));
    }
}
