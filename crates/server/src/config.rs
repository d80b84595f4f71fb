//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `HUB_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `HUB_HOST` - Bind address (default: 127.0.0.1)
//! - `HUB_PORT` - Listen port (default: 5000)
//! - `HUB_BASE_URL` - Public URL; `https://` turns on secure cookies
//!   (default: <http://localhost:5000>)
//! - `HUB_LOG_FORMAT` - `json` or `text` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate 0.0-1.0 (default: 0.1)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `json` or `text`, got `{other}`")),
        }
    }
}

/// Sentry error tracking settings.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.1,
        }
    }
}

/// Server configuration.
///
/// `Debug` is safe to log: the database URL is a `SecretString`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry settings
    pub sentry: SentryConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("HUB_DATABASE_URL")?;
        let host = parse_env("HUB_HOST", &get_env_or_default("HUB_HOST", "127.0.0.1"))?;
        let port = parse_env("HUB_PORT", &get_env_or_default("HUB_PORT", "5000"))?;
        let base_url = get_env_or_default("HUB_BASE_URL", "http://localhost:5000");
        let log_format = parse_env("HUB_LOG_FORMAT", &get_env_or_default("HUB_LOG_FORMAT", "text"))?;

        let defaults = SentryConfig::default();
        let sentry = SentryConfig {
            dsn: get_optional_env("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: get_optional_env("SENTRY_SAMPLE_RATE")
                .map(|raw| parse_sample_rate("SENTRY_SAMPLE_RATE", &raw))
                .transpose()?
                .unwrap_or(defaults.sample_rate),
            traces_sample_rate: get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
                .map(|raw| parse_sample_rate("SENTRY_TRACES_SAMPLE_RATE", &raw))
                .transpose()?
                .unwrap_or(defaults.traces_sample_rate),
        };

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            log_format,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Load just the database URL, for tools that need nothing else.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if neither `HUB_DATABASE_URL` nor
/// `DATABASE_URL` is set.
pub fn database_url_from_env() -> Result<SecretString, ConfigError> {
    let _ = dotenvy::dotenv();
    get_database_url("HUB_DATABASE_URL")
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_sample_rate(key: &str, raw: &str) -> Result<f32, ConfigError> {
    let rate: f32 = parse_env(key, raw)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("{rate} is outside 0.0..=1.0"),
        ))
    }
}
