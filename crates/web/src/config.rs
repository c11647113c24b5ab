//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SUPABASE_URL` - Base URL of the hosted auth/database provider
//! - `SUPABASE_ANON_KEY` - Public anonymous API key
//!
//! ## Optional
//! - `SUPABASE_SERVICE_ROLE_KEY` - Privileged service-role key (validated when set)
//! - `SUPABASE_JWT_SECRET` - JWT signing secret (validated when set)
//! - `FAMILYSYNC_HOST` - Bind address (default: 127.0.0.1)
//! - `FAMILYSYNC_PORT` - Listen port (default: 3000)
//! - `FAMILYSYNC_BASE_URL` - Public URL (default: `http://localhost:<port>`)
//! - `FAMILYSYNC_ENV` - `development`, `test` or `production` (default: development)
//! - `FAMILYSYNC_DEPLOYMENT` - Free-form deployment label (e.g. preview, main)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
];

/// Environment variable names read by the application.
pub mod vars {
    pub const SUPABASE_URL: &str = "SUPABASE_URL";
    pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
    pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
    pub const SUPABASE_JWT_SECRET: &str = "SUPABASE_JWT_SECRET";
    pub const HOST: &str = "FAMILYSYNC_HOST";
    pub const PORT: &str = "FAMILYSYNC_PORT";
    pub const BASE_URL: &str = "FAMILYSYNC_BASE_URL";
    pub const ENV: &str = "FAMILYSYNC_ENV";
    pub const DEPLOYMENT: &str = "FAMILYSYNC_DEPLOYMENT";
    pub const SENTRY_DSN: &str = "SENTRY_DSN";
    pub const SENTRY_SAMPLE_RATE: &str = "SENTRY_SAMPLE_RATE";
    pub const SENTRY_TRACES_SAMPLE_RATE: &str = "SENTRY_TRACES_SAMPLE_RATE";
}

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Runtime environment the server is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// FamilySync application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the application
    pub base_url: Url,
    /// Hosted auth/database provider configuration
    pub supabase: SupabaseConfig,
    /// Runtime environment
    pub environment: Environment,
    /// Deployment label (e.g. preview branch name)
    pub deployment: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry error event sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Hosted auth/database provider configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Provider base URL (e.g. `https://abcd.supabase.co`)
    pub url: Url,
    /// Public anonymous key, sent as the `apikey` header
    pub anon_key: String,
    /// Privileged service-role key (server-side only)
    pub service_role_key: Option<SecretString>,
    /// JWT signing secret
    pub jwt_secret: Option<SecretString>,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |s: &Option<SecretString>| s.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url.as_str())
            .field("anon_key", &self.anon_key)
            .field("service_role_key", &redact(&self.service_role_key))
            .field("jwt_secret", &redact(&self.jwt_secret))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if a configured secret fails validation (placeholder detection,
    /// entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(&lookup);

        let host = env
            .or_default(vars::HOST, "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar(vars::HOST.to_string(), e.to_string()))?;
        let port = env
            .or_default(vars::PORT, "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar(vars::PORT.to_string(), e.to_string()))?;
        let raw_base_url = env
            .optional(vars::BASE_URL)
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        let base_url = Url::parse(&raw_base_url)
            .map_err(|e| ConfigError::InvalidEnvVar(vars::BASE_URL.to_string(), e.to_string()))?;
        let environment = env
            .or_default(vars::ENV, "development")
            .parse::<Environment>()
            .map_err(|e| ConfigError::InvalidEnvVar(vars::ENV.to_string(), e))?;

        Ok(Self {
            host,
            port,
            base_url,
            supabase: SupabaseConfig::from_env(&env)?,
            environment,
            deployment: env.optional(vars::DEPLOYMENT),
            sentry_dsn: env.optional(vars::SENTRY_DSN),
            sentry_sample_rate: env.rate(vars::SENTRY_SAMPLE_RATE, 1.0)?,
            sentry_traces_sample_rate: env.rate(vars::SENTRY_TRACES_SAMPLE_RATE, 0.1)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

impl SupabaseConfig {
    fn from_env<F>(env: &Env<'_, F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = env.required(vars::SUPABASE_URL)?;
        let url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar(vars::SUPABASE_URL.to_string(), e.to_string())
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                vars::SUPABASE_URL.to_string(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        Ok(Self {
            url,
            anon_key: env.required(vars::SUPABASE_ANON_KEY)?,
            service_role_key: env.optional_secret(vars::SUPABASE_SERVICE_ROLE_KEY)?,
            jwt_secret: env.optional_secret(vars::SUPABASE_JWT_SECRET)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the typed accessors used above.
struct Env<'a, F>(&'a F);

impl<F> Env<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn optional_secret(&self, key: &str) -> Result<Option<SecretString>, ConfigError> {
        self.optional(key)
            .map(|value| {
                validate_secret_strength(&value, key)?;
                Ok(SecretString::from(value))
            })
            .transpose()
    }

    fn rate(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(default);
        };
        let rate = raw
            .parse::<f32>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must be between 0.0 and 1.0 (got {rate})"),
            ));
        }
        Ok(rate)
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
