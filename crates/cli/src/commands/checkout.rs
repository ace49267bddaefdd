//! Scripted checkout command.

use tracing::info;

use affinity_checkout::{CheckoutConfig, CheckoutController, MockCheckoutAdapter, Outcome};

use super::{CartArgs, CliError, ContactArgs, log_cart};

/// Walk the checkout step machine from an empty cart to a placed order.
///
/// # Errors
///
/// Returns the first rejected step (empty cart, invalid email, missing
/// address fields) or a catalog error for an unknown item.
pub async fn run(
    config: &CheckoutConfig,
    cart_args: &CartArgs,
    contact: ContactArgs,
) -> Result<(), CliError> {
    let mut checkout = CheckoutController::new(MockCheckoutAdapter::new(config), config);

    for spec in &cart_args.items {
        checkout.add_to_cart(spec.to_line_item()?)?;
    }

    info!("Loading shipping methods...");
    checkout.load_shipping_methods().await?;

    let method_id = cart_args
        .shipping
        .clone()
        .unwrap_or_else(|| checkout.shipping_method_id().to_string());
    checkout.select_shipping_method(&method_id)?;
    log_cart(checkout.cart(), config.currency);

    let (customer, address) = contact.into_forms(&config.default_country);

    checkout.begin_checkout()?;
    checkout.set_customer(customer);
    checkout.continue_to_shipping()?;
    checkout.set_shipping_address(address);
    checkout.continue_to_review()?;

    info!("Placing order...");
    match checkout.place_order().await? {
        Outcome::Applied(order_id) => info!("Order confirmed: {order_id}"),
        Outcome::Stale => info!("Checkout closed before the order was confirmed"),
    }

    checkout.dismiss()?;
    Ok(())
}
