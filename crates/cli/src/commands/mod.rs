//! Subcommand implementations and their shared arguments.

pub mod catalog;
pub mod checkout;
pub mod quote;

use std::str::FromStr;

use clap::Args;
use thiserror::Error;
use tracing::info;

use affinity_checkout::{Cart, CheckoutError, CustomerInfo, ShippingAddress};
use affinity_core::{CatalogError, CurrencyCode, NewCartItem, Price, Size, catalog as core_catalog};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// An `--item` value could not be parsed.
    #[error("Invalid item '{0}': expected colour:size[:quantity], e.g. black:M:2")]
    InvalidItem(String),

    /// The catalog rejected a selection.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The checkout rejected a step or the backend failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// One `--item colour:size[:quantity]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub color: String,
    pub size: Size,
    pub quantity: u32,
}

impl ItemSpec {
    /// Resolve against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for unknown colours or unavailable sizes.
    pub fn to_line_item(&self) -> Result<NewCartItem, CatalogError> {
        core_catalog::line_item(&self.color, self.size, self.quantity)
    }
}

impl FromStr for ItemSpec {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CliError::InvalidItem(s.to_string());
        let mut parts = s.split(':');

        let color = parts.next().filter(|c| !c.is_empty()).ok_or_else(invalid)?;
        let size = parts
            .next()
            .ok_or_else(invalid)?
            .parse::<Size>()
            .map_err(|_| invalid())?;
        let quantity = parts
            .next()
            .map_or(Ok(1), str::parse::<u32>)
            .map_err(|_| invalid())?;

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            color: color.to_string(),
            size,
            quantity,
        })
    }
}

/// Arguments describing the cart to build.
#[derive(Debug, Args)]
pub struct CartArgs {
    /// Item as colour:size[:quantity], e.g. black:M:2 (repeatable)
    #[arg(short, long = "item", required = true)]
    pub items: Vec<ItemSpec>,

    /// Shipping method id (`standard`, `express`)
    #[arg(short, long)]
    pub shipping: Option<String>,
}

/// Contact and address details for a scripted checkout.
#[derive(Debug, Args)]
pub struct ContactArgs {
    /// Contact email
    #[arg(short, long)]
    pub email: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Opt out of marketing email
    #[arg(long)]
    pub no_marketing: bool,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Address line 1
    #[arg(long, default_value = "")]
    pub address1: String,

    /// Address line 2
    #[arg(long)]
    pub address2: Option<String>,

    #[arg(long, default_value = "")]
    pub city: String,

    /// County or state
    #[arg(long, default_value = "")]
    pub province: String,

    #[arg(long, default_value = "")]
    pub postal_code: String,

    /// Country (defaults to `CHECKOUT_DEFAULT_COUNTRY`)
    #[arg(long)]
    pub country: Option<String>,
}

impl ContactArgs {
    /// Split into the two checkout forms.
    #[must_use]
    pub fn into_forms(self, default_country: &str) -> (CustomerInfo, ShippingAddress) {
        let customer = CustomerInfo {
            email: self.email,
            phone: self.phone,
            marketing_consent: !self.no_marketing,
        };
        let address = ShippingAddress {
            first_name: self.first_name,
            last_name: self.last_name,
            address1: self.address1,
            address2: self.address2,
            city: self.city,
            province: self.province,
            postal_code: self.postal_code,
            country: self.country.unwrap_or_else(|| default_country.to_string()),
        };
        (customer, address)
    }
}

/// Log every line and the totals of a cart.
pub fn log_cart(cart: &Cart, currency: CurrencyCode) {
    for line in cart.lines() {
        info!(
            "{} x {} ({}) @ {} = {}",
            line.quantity,
            line.title,
            line.size,
            Price::from_cents(line.unit_price_cents, currency),
            Price::from_cents(line.line_total_cents(), currency),
        );
    }
    info!("Subtotal: {}", Price::from_cents(cart.subtotal_cents(), currency));
    info!("Estimated tax: {}", Price::from_cents(cart.estimated_tax_cents(), currency));
    info!("Shipping: {}", Price::display_shipping(cart.shipping_cents(), currency));
    info!("Total: {}", Price::from_cents(cart.total_cents(), currency));
}
