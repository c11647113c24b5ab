//! End-to-end tests for FamilySync.
//!
//! These tests drive a running server over HTTP, which in turn talks to a
//! real provider project. They are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server against a test project
//! FAMILYSYNC_ENV=test cargo run -p familysync-web
//!
//! # Run the end-to-end tests
//! FAMILYSYNC_TEST_EMAIL=... FAMILYSYNC_TEST_PASSWORD=... \
//!     cargo test -p familysync-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `FAMILYSYNC_TEST_BASE_URL` - Server under test (default `http://localhost:3000`)
//! - `FAMILYSYNC_TEST_EMAIL` / `FAMILYSYNC_TEST_PASSWORD` - A test member's
//!   credentials; tests that need a signed-in session are skipped without them

#![cfg_attr(not(test), forbid(unsafe_code))]

use familysync_core::Email;
use reqwest::{Client, redirect};
use secrecy::{ExposeSecret, SecretString};

/// Default address of the server under test.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Credentials of the member the tests sign in as.
pub struct TestCredentials {
    pub email: Email,
    pub password: SecretString,
}

impl TestCredentials {
    /// Read credentials from the environment, if configured.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("FAMILYSYNC_TEST_EMAIL").ok()?;
        let password = std::env::var("FAMILYSYNC_TEST_PASSWORD").ok()?;

        Some(Self {
            email: Email::parse(&email).ok()?,
            password: SecretString::from(password),
        })
    }
}

/// HTTP client and target for one test.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Create a context with a fresh cookie jar.
    ///
    /// Redirects are not followed so tests can assert on them.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, reqwest::Error> {
        let base_url = std::env::var("FAMILYSYNC_TEST_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for a path on the server under test.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sign in through the login form; the session cookies land in the jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sign_in(
        &self,
        credentials: &TestCredentials,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(self.url("/auth/login"))
            .form(&[
                ("email", credentials.email.as_str()),
                ("password", credentials.password.expose_secret()),
            ])
            .send()
            .await
    }
}
