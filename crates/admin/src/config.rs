//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MARKETPLACE_API_URL` - Base URL of the marketplace REST API
//!
//! ## Optional
//! - `MARKETPLACE_SESSION_COOKIE` - Pre-issued session cookie value, sent
//!   verbatim as the `Cookie` header (sessions are issued by the backend;
//!   this tool only carries them)
//! - `MARKETPLACE_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `ADMIN_REFRESH_SECS` - Listing auto-refresh interval (default: 60)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment (e.g., "development", "production")
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (0.0 to 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (0.0 to 1.0)

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

use crate::components::refresh::DEFAULT_REFRESH_INTERVAL;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

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
    "paste-",
];

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

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Marketplace API connection settings
    pub market: MarketConfig,
    /// Listing auto-refresh interval
    pub refresh_interval: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Marketplace API connection settings.
///
/// Implements `Debug` manually to redact the session cookie.
#[derive(Clone)]
pub struct MarketConfig {
    /// Base URL of the marketplace REST API
    pub base_url: Url,
    /// Pre-issued session cookie value, sent verbatim as the `Cookie` header
    pub session_cookie: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    /// A suspicious-looking session cookie (placeholder text, low entropy)
    /// only logs a warning, since the variable is optional to begin with.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let market = MarketConfig::from_env()?;

        let refresh_interval = match get_optional_env("ADMIN_REFRESH_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .map_err(|e| invalid("ADMIN_REFRESH_SECS", &e.to_string()))?,
            ),
            None => DEFAULT_REFRESH_INTERVAL,
        };

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            market,
            refresh_interval,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }
}

impl MarketConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_required_env("MARKETPLACE_API_URL")?;
        let base_url = Url::parse(&raw_url)
            .map_err(|e| invalid("MARKETPLACE_API_URL", &e.to_string()))?;

        let session_cookie = get_optional_env("MARKETPLACE_SESSION_COOKIE").map(|value| {
            if let Err(e) = validate_secret_strength(&value, "MARKETPLACE_SESSION_COOKIE") {
                tracing::warn!("MARKETPLACE_SESSION_COOKIE validation warning: {e}");
            }
            SecretString::from(value)
        });

        let timeout_secs = get_env_or_default("MARKETPLACE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        let timeout = Duration::from_secs(
            timeout_secs
                .parse::<u64>()
                .map_err(|e| invalid("MARKETPLACE_TIMEOUT_SECS", &e.to_string()))?,
        );

        Ok(Self {
            base_url,
            session_cookie,
            timeout,
        })
    }

    /// Returns the session cookie value, if one was configured.
    #[must_use]
    pub fn session_cookie_value(&self) -> Option<&str> {
        self.session_cookie
            .as_ref()
            .map(ExposeSecret::expose_secret)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: u64) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
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
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real session tokens have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the cookie value issued by the backend."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> AdminConfig {
        AdminConfig {
            market: MarketConfig {
                base_url: Url::parse("http://localhost:4000/").unwrap(),
                session_cookie: Some(SecretString::from("sid=aB3xY9mK2nL5pQ7rT0uW4zC6")),
                timeout: Duration::from_secs(30),
            },
            refresh_interval: Duration::from_secs(60),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-cookie-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("sid=s%3AB3xY9mK2nL5pQ7rT0uW4zC6fh", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_market_config_debug_redacts_cookie() {
        let config = test_config();
        let debug = format!("{:?}", config.market);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("aB3xY9mK2nL5"));
    }

    #[test]
    fn test_session_cookie_value_exposes_inner() {
        let config = test_config();
        assert_eq!(
            config.market.session_cookie_value(),
            Some("sid=aB3xY9mK2nL5pQ7rT0uW4zC6")
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_TIMEOUT_SECS, 30);
        // The config fallback is the same constant the dashboard screens use.
        assert_eq!(DEFAULT_REFRESH_INTERVAL, Duration::from_secs(60));
    }
}
