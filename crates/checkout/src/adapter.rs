//! Commerce adapter.
//!
//! [`CheckoutAdapter`] is the seam between the checkout controller and a
//! commerce backend. The synchronous operations are pure cart arithmetic; the
//! asynchronous ones stand in for network calls.
//!
//! [`MockCheckoutAdapter`] is the in-memory backend: it serves the static
//! shipping catalog, simulates latency with `tokio::time::sleep`, and accepts
//! every order.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use affinity_core::{LineId, NewCartItem, OrderId, TaxRate};

use crate::cart::{self, Cart};
use crate::config::CheckoutConfig;
use crate::customer::{CustomerInfo, ShippingAddress};
use crate::error::Result;
use crate::shipping::{self, ShippingMethod};

/// What a backend returns after an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub success: bool,
    pub placed_at: DateTime<Utc>,
}

/// Operations the checkout needs from a commerce backend.
///
/// The asynchronous methods return `Result` so that real backends can report
/// declined payments or outages; implementors must not mutate the cart they
/// are given.
#[async_trait]
pub trait CheckoutAdapter: Send + Sync {
    /// Tax rate used for every recomputation.
    fn tax_rate(&self) -> TaxRate;

    /// A new, empty cart with a fresh id.
    fn create_cart(&self) -> Cart {
        cart::create_cart()
    }

    /// Add an item, merging by variant.
    fn add_line_item(&self, cart: &Cart, item: NewCartItem) -> Cart {
        cart::add_line_item(cart, item, self.tax_rate())
    }

    /// Set a line's quantity; `<= 0` removes the line.
    fn update_line_item_qty(&self, cart: &Cart, line_id: &LineId, quantity: i64) -> Cart {
        cart::update_line_item_qty(cart, line_id, quantity, self.tax_rate())
    }

    /// Apply a shipping method by id.
    fn set_shipping_method(&self, cart: &Cart, method_id: &str) -> Cart;

    /// Fetch the shipping methods on offer.
    async fn get_shipping_methods(&self) -> Result<Vec<ShippingMethod>>;

    /// Submit an order for the cart.
    async fn place_order(
        &self,
        cart: &Cart,
        customer: &CustomerInfo,
        address: &ShippingAddress,
    ) -> Result<OrderConfirmation>;
}

/// In-memory commerce backend with simulated latency.
#[derive(Debug, Clone)]
pub struct MockCheckoutAdapter {
    methods: Vec<ShippingMethod>,
    tax_rate: TaxRate,
    shipping_delay: Duration,
    order_delay: Duration,
}

impl MockCheckoutAdapter {
    /// Create a mock adapter with delays and tax rate from configuration.
    #[must_use]
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            methods: shipping::catalog(),
            tax_rate: config.tax_rate,
            shipping_delay: config.shipping_delay,
            order_delay: config.order_delay,
        }
    }

    /// The static shipping catalog, without waiting.
    #[must_use]
    pub fn shipping_catalog(&self) -> &[ShippingMethod] {
        &self.methods
    }
}

impl Default for MockCheckoutAdapter {
    fn default() -> Self {
        Self::new(&CheckoutConfig::default())
    }
}

#[async_trait]
impl CheckoutAdapter for MockCheckoutAdapter {
    fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    fn set_shipping_method(&self, cart: &Cart, method_id: &str) -> Cart {
        cart::set_shipping_method(cart, method_id, &self.methods, self.tax_rate)
    }

    #[instrument(skip(self))]
    async fn get_shipping_methods(&self) -> Result<Vec<ShippingMethod>> {
        tokio::time::sleep(self.shipping_delay).await;
        Ok(self.methods.clone())
    }

    #[instrument(skip_all, fields(cart_id = %cart.id(), total_cents = cart.total_cents()))]
    async fn place_order(
        &self,
        cart: &Cart,
        customer: &CustomerInfo,
        address: &ShippingAddress,
    ) -> Result<OrderConfirmation> {
        tokio::time::sleep(self.order_delay).await;

        let confirmation = OrderConfirmation {
            order_id: OrderId::generate(),
            success: true,
            placed_at: Utc::now(),
        };

        info!(
            order_id = %confirmation.order_id,
            email = %customer.email,
            country = %address.country,
            lines = cart.lines().len(),
            "mock order placed"
        );

        Ok(confirmation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use affinity_core::{Size, catalog};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_get_shipping_methods_waits_for_delay() {
        let adapter = MockCheckoutAdapter::default();
        let start = tokio::time::Instant::now();

        let methods = adapter.get_shipping_methods().await.unwrap();

        assert_eq!(methods, shipping::catalog());
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_always_succeeds() {
        let adapter = MockCheckoutAdapter::default();
        let cart = adapter.add_line_item(
            &adapter.create_cart(),
            catalog::line_item("black", Size::M, 1).unwrap(),
        );
        let start = tokio::time::Instant::now();

        let confirmation = adapter
            .place_order(
                &cart,
                &CustomerInfo::with_email("a@b.c"),
                &ShippingAddress::with_country("Ireland"),
            )
            .await
            .unwrap();

        assert!(confirmation.success);
        assert!(OrderId::is_well_formed(confirmation.order_id.as_str()));
        assert!(start.elapsed() >= Duration::from_millis(1500));
        // The cart handed in is left untouched
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_adapter_uses_configured_tax_rate() {
        let config = CheckoutConfig {
            tax_rate: TaxRate::from_basis_points(2_300),
            ..CheckoutConfig::default()
        };
        let adapter = MockCheckoutAdapter::new(&config);
        let cart = adapter.add_line_item(
            &adapter.create_cart(),
            catalog::line_item("blue", Size::S, 1).unwrap(),
        );
        assert_eq!(cart.estimated_tax_cents(), 1_380);
    }

    #[test]
    fn test_set_shipping_method_through_adapter() {
        let adapter = MockCheckoutAdapter::default();
        let cart = adapter.set_shipping_method(&adapter.create_cart(), shipping::EXPRESS);
        assert_eq!(cart.shipping_cents(), 1_500);
        assert_eq!(cart.total_cents(), 1_500);
    }
}
