//! Authentication error types.

use thiserror::Error;

/// Errors that can occur when talking to the auth/database provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider answered with an error. Displays the provider's message
    /// verbatim.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured anon key cannot be sent as a header.
    #[error("invalid anon key: {0}")]
    InvalidApiKey(String),

    /// Failed to build a provider endpoint URL.
    #[error("invalid provider URL: {0}")]
    Url(#[from] url::ParseError),

    /// The provider answered successfully but the body was not understood.
    #[error("unexpected provider response: {0}")]
    Decode(String),
}

impl AuthError {
    /// HTTP status reported by the provider, if any.
    #[must_use]
    pub const fn provider_status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }
}
