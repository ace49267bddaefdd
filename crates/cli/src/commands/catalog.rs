//! Catalog listing command.

use tracing::info;

use affinity_checkout::{CheckoutAdapter, CheckoutConfig, MockCheckoutAdapter};
use affinity_core::catalog::{COLOR_SEQUENCE, COMPARE_AT_CENTS, PRODUCT_TITLE, UNIT_PRICE_CENTS};
use affinity_core::{Price, Size};

use super::CliError;

/// Log the product, its colours and sizes, and the shipping methods.
///
/// Shipping methods are fetched through the adapter, so this waits for the
/// configured shipping delay.
///
/// # Errors
///
/// Returns an error if the shipping methods cannot be fetched.
pub async fn show(config: &CheckoutConfig) -> Result<(), CliError> {
    let currency = config.currency;

    info!(
        "{PRODUCT_TITLE}: {} (was {})",
        Price::from_cents(UNIT_PRICE_CENTS, currency),
        Price::from_cents(COMPARE_AT_CENTS, currency),
    );

    for color in &COLOR_SEQUENCE {
        info!("Colour {:<9} {:<10} {}", color.key, color.label, color.image);
    }

    for size in Size::ALL {
        let availability = if size.is_available() { "available" } else { "sold out" };
        info!("Size {size:<3} {availability}");
    }

    let adapter = MockCheckoutAdapter::new(config);
    for method in adapter.get_shipping_methods().await? {
        info!(
            "Shipping {:<9} {:<18} {:<8} {}",
            method.id,
            method.label,
            Price::display_shipping(method.price_cents, currency),
            method.description.as_deref().unwrap_or_default(),
        );
    }

    Ok(())
}
