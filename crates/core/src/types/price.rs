//! Money display and tax arithmetic.
//!
//! All arithmetic in the checkout happens on integer cents (`i64`). [`Price`]
//! exists only to turn cents into something a shopper can read; it converts
//! to `rust_decimal` so formatting never goes through floating point.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information, used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }

    /// Format a shipping charge, rendering zero as "Free".
    #[must_use]
    pub fn display_shipping(cents: i64, currency_code: CurrencyCode) -> String {
        if cents == 0 {
            "Free".to_string()
        } else {
            Self::from_cents(cents, currency_code).display()
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol used when formatting prices.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

/// A flat sales tax rate expressed in basis points (1/100th of a percent).
///
/// Tax is rounded half-up to the nearest cent, matching how the storefront
/// has always displayed its estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    const BASIS_POINTS_PER_UNIT: i64 = 10_000;

    /// The 10% flat rate applied to every cart.
    pub const STANDARD: Self = Self(1_000);

    /// Create a tax rate from basis points (`1000` = 10%).
    #[must_use]
    pub const fn from_basis_points(bps: u32) -> Self {
        Self(bps)
    }

    /// Get the rate in basis points.
    #[must_use]
    pub const fn basis_points(self) -> u32 {
        self.0
    }

    /// Estimated tax on `subtotal_cents`, rounded half-up to the nearest cent.
    #[must_use]
    pub fn apply(self, subtotal_cents: i64) -> i64 {
        let scaled = subtotal_cents.saturating_mul(i64::from(self.0));
        scaled
            .saturating_add(Self::BASIS_POINTS_PER_UNIT / 2)
            .div_euclid(Self::BASIS_POINTS_PER_UNIT)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::STANDARD
    }
}
