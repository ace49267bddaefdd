//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `CHECKOUT_*` - See [`affinity_checkout::config`]
//! - `SENTRY_DSN` - Sentry error tracking DSN (optional)
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (optional)

use affinity_checkout::{CheckoutConfig, ConfigError};

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Checkout behaviour (delays, tax, defaults)
    pub checkout: CheckoutConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a checkout variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Also loads .env
        let checkout = CheckoutConfig::from_env()?;

        Ok(Self {
            checkout,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
