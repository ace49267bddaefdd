//! Cart quote command.

use tracing::info;

use affinity_checkout::{Cart, CheckoutAdapter, CheckoutConfig, MockCheckoutAdapter};

use super::{CartArgs, CliError, log_cart};

/// Build a cart from `--item` arguments without going through checkout.
///
/// # Errors
///
/// Returns an error if an item does not resolve against the catalog.
pub fn build_cart(adapter: &impl CheckoutAdapter, args: &CartArgs) -> Result<Cart, CliError> {
    let mut cart = adapter.create_cart();
    for spec in &args.items {
        cart = adapter.add_line_item(&cart, spec.to_line_item()?);
    }
    if let Some(method_id) = &args.shipping {
        cart = adapter.set_shipping_method(&cart, method_id);
    }
    Ok(cart)
}

/// Log the totals of the requested cart.
///
/// # Errors
///
/// Returns an error if an item does not resolve against the catalog.
pub fn show(config: &CheckoutConfig, args: &CartArgs) -> Result<(), CliError> {
    let adapter = MockCheckoutAdapter::new(config);
    let cart = build_cart(&adapter, args)?;

    info!("Cart {} ({} items)", cart.id(), cart.item_count());
    log_cart(&cart, config.currency);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(items: &[&str], shipping: Option<&str>) -> CartArgs {
        CartArgs {
            items: items.iter().map(|s| s.parse().unwrap()).collect(),
            shipping: shipping.map(str::to_string),
        }
    }

    #[test]
    fn test_build_cart_merges_and_prices() {
        let adapter = MockCheckoutAdapter::default();
        let cart = build_cart(&adapter, &args(&["black:M", "black:M:2"], Some("express"))).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.subtotal_cents(), 18_000);
        assert_eq!(cart.estimated_tax_cents(), 1_800);
        assert_eq!(cart.shipping_cents(), 1_500);
        assert_eq!(cart.total_cents(), 21_300);
    }

    #[test]
    fn test_build_cart_unknown_colour() {
        let adapter = MockCheckoutAdapter::default();
        let err = build_cart(&adapter, &args(&["orange:M"], None)).unwrap_err();
        assert!(matches!(err, CliError::Catalog(_)));
    }
}
