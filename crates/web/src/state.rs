//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::auth::{AuthError, AuthService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds nothing mutable: the configuration
/// and the provider client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    auth: AuthService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider client cannot be built from the
    /// configuration.
    pub fn new(config: AppConfig) -> Result<Self, AuthError> {
        let auth = AuthService::new(&config.supabase)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, auth }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the provider client.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }
}
