//! Types exchanged with the provider's auth API.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use familysync_core::UserId;

use crate::models::SessionTokens;

/// The authenticated user as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    /// Provider-side role (usually `authenticated`), not the family role.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// An authentication context: the tokens the request carried plus the user
/// they belong to.
#[derive(Debug, Clone)]
pub struct Session {
    pub tokens: SessionTokens,
    pub user: AuthUser,
}

impl Session {
    /// Display label for the header: email when known, else the user ID.
    #[must_use]
    pub fn label(&self) -> String {
        self.user
            .email
            .clone()
            .unwrap_or_else(|| self.user.id.to_string())
    }
}

/// Tokens issued by a successful password sign-in.
#[derive(Debug)]
pub struct TokenGrant {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: AuthUser,
}

/// Raw token response from the provider's token endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    pub user: AuthUser,
}

/// Provider default access token lifetime.
const fn default_expires_in() -> i64 {
    3600
}

impl From<TokenResponse> for TokenGrant {
    fn from(raw: TokenResponse) -> Self {
        Self {
            access_token: SecretString::from(raw.access_token),
            refresh_token: raw.refresh_token.map(SecretString::from),
            expires_in: raw.expires_in,
            user: raw.user,
        }
    }
}
