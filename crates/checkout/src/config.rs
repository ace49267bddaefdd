//! Checkout configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CHECKOUT_SHIPPING_DELAY_MS` - Simulated latency of the shipping-methods call (default: 300)
//! - `CHECKOUT_ORDER_DELAY_MS` - Simulated latency of order placement (default: 1500)
//! - `CHECKOUT_TAX_RATE_BPS` - Flat tax rate in basis points (default: 1000, i.e. 10%)
//! - `CHECKOUT_DEFAULT_SHIPPING_METHOD` - Method selected when checkout opens (default: standard)
//! - `CHECKOUT_DEFAULT_COUNTRY` - Country pre-filled in the address form (default: Ireland)
//! - `CHECKOUT_CURRENCY` - ISO 4217 code used for display (default: USD)

use std::time::Duration;

use thiserror::Error;

use affinity_core::{CurrencyCode, TaxRate};

use crate::shipping;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Delay before `get_shipping_methods` resolves
    pub shipping_delay: Duration,
    /// Delay before `place_order` resolves
    pub order_delay: Duration,
    /// Flat tax rate applied to the subtotal
    pub tax_rate: TaxRate,
    /// Shipping method selected when a session starts
    pub default_shipping_method: String,
    /// Country pre-filled in the shipping address
    pub default_country: String,
    /// Currency used to format prices
    pub currency: CurrencyCode,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            shipping_delay: Duration::from_millis(300),
            order_delay: Duration::from_millis(1_500),
            tax_rate: TaxRate::STANDARD,
            default_shipping_method: shipping::STANDARD.to_string(),
            default_country: "Ireland".to_string(),
            currency: CurrencyCode::USD,
        }
    }
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let shipping_delay = get_optional_millis("CHECKOUT_SHIPPING_DELAY_MS")?
            .unwrap_or(defaults.shipping_delay);
        let order_delay =
            get_optional_millis("CHECKOUT_ORDER_DELAY_MS")?.unwrap_or(defaults.order_delay);
        let tax_rate = get_optional_env("CHECKOUT_TAX_RATE_BPS")
            .map(|v| {
                v.parse::<u32>().map(TaxRate::from_basis_points).map_err(|e| {
                    ConfigError::InvalidEnvVar("CHECKOUT_TAX_RATE_BPS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(defaults.tax_rate);
        let default_shipping_method = get_env_or_default(
            "CHECKOUT_DEFAULT_SHIPPING_METHOD",
            &defaults.default_shipping_method,
        );
        let default_country =
            get_env_or_default("CHECKOUT_DEFAULT_COUNTRY", &defaults.default_country);
        let currency = get_env_or_default("CHECKOUT_CURRENCY", defaults.currency.code())
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("CHECKOUT_CURRENCY".to_string(), e))?;

        Ok(Self {
            shipping_delay,
            order_delay,
            tax_rate,
            default_shipping_method,
            default_country,
            currency,
        })
    }

    /// The same configuration with both simulated delays removed.
    #[must_use]
    pub fn without_delays(self) -> Self {
        Self {
            shipping_delay: Duration::ZERO,
            order_delay: Duration::ZERO,
            ..self
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an optional millisecond duration.
fn get_optional_millis(key: &str) -> Result<Option<Duration>, ConfigError> {
    get_optional_env(key)
        .map(|v| parse_millis(key, &v))
        .transpose()
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
