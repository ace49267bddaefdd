//! Integration tests for the checkout step machine.
//!
//! These drive a `CheckoutController` over the mock adapter with the tokio
//! clock paused, so the simulated network delays complete instantly.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use affinity_checkout::{
    CheckoutAdapter, CheckoutConfig, CheckoutController, CheckoutError, MockCheckoutAdapter,
    Outcome, ValidationError,
};
use affinity_core::{CheckoutStep, OrderId, Size, catalog};

fn controller() -> CheckoutController<MockCheckoutAdapter> {
    let config = CheckoutConfig::default();
    CheckoutController::new(MockCheckoutAdapter::new(&config), &config)
}

fn fill_forms(checkout: &mut CheckoutController<MockCheckoutAdapter>) {
    checkout.customer_mut().email = "shopper@example.com".to_string();
    let address = checkout.address_mut();
    address.first_name = "Aoife".to_string();
    address.last_name = "Byrne".to_string();
    address.address1 = "1 Grafton Street".to_string();
    address.city = "Dublin".to_string();
    address.postal_code = "D02 XY45".to_string();
}

// =============================================================================
// Full Flow
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_full_checkout_flow() {
    let mut checkout = controller();

    let outcome = checkout.load_shipping_methods().await.unwrap();
    assert_eq!(outcome, Outcome::Applied(()));
    assert_eq!(checkout.shipping_methods().len(), 2);

    checkout.add_to_cart(catalog::line_item("black", Size::M, 1).unwrap()).unwrap();
    checkout.add_to_cart(catalog::line_item("black", Size::M, 1).unwrap()).unwrap();
    checkout.add_to_cart(catalog::line_item("pink", Size::S, 1).unwrap()).unwrap();
    checkout.select_shipping_method("express").unwrap();

    let cart = checkout.cart();
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal_cents(), 18_000);
    assert_eq!(cart.estimated_tax_cents(), 1_800);
    assert_eq!(cart.shipping_cents(), 1_500);
    assert_eq!(cart.total_cents(), 21_300);

    checkout.begin_checkout().unwrap();
    fill_forms(&mut checkout);
    checkout.continue_to_shipping().unwrap();
    checkout.continue_to_review().unwrap();
    assert_eq!(checkout.step(), CheckoutStep::Review);

    let order_id = checkout.place_order().await.unwrap().applied().unwrap();
    assert!(OrderId::is_well_formed(order_id.as_str()));
    assert_eq!(checkout.step(), CheckoutStep::Success);
    assert_eq!(checkout.order_id(), Some(&order_id));
    assert!(checkout.cart().is_fresh());
    assert!(!checkout.is_placing_order());

    checkout.dismiss().unwrap();
    assert_eq!(checkout.step(), CheckoutStep::Cart);
    assert!(checkout.cart().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_order_waits_for_configured_delay() {
    let config = CheckoutConfig::default();
    let mut checkout = CheckoutController::new(MockCheckoutAdapter::new(&config), &config);
    checkout.add_to_cart(catalog::line_item("gray", Size::L, 1).unwrap()).unwrap();
    checkout.begin_checkout().unwrap();
    fill_forms(&mut checkout);
    checkout.continue_to_shipping().unwrap();
    checkout.continue_to_review().unwrap();

    let started = tokio::time::Instant::now();
    checkout.place_order().await.unwrap();
    assert!(started.elapsed() >= config.order_delay);
    assert!(started.elapsed() < config.order_delay + Duration::from_millis(50));
}

// =============================================================================
// Step Gates
// =============================================================================

#[test]
fn test_empty_cart_cannot_start_checkout() {
    let mut checkout = controller();
    assert!(matches!(checkout.begin_checkout(), Err(CheckoutError::EmptyCart)));
    assert_eq!(checkout.step(), CheckoutStep::Cart);
}

#[test]
fn test_invalid_email_keeps_info_step() {
    let mut checkout = controller();
    checkout.add_to_cart(catalog::line_item("blue", Size::XL, 1).unwrap()).unwrap();
    checkout.begin_checkout().unwrap();
    checkout.customer_mut().email = "invalid".to_string();

    let err = checkout.continue_to_shipping().unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::Validation(ValidationError::InvalidEmail(_))
    ));
    assert_eq!(err.to_string(), "Please enter a valid email");
    assert_eq!(checkout.step(), CheckoutStep::Info);
}

#[test]
fn test_missing_city_keeps_shipping_step() {
    let mut checkout = controller();
    checkout.add_to_cart(catalog::line_item("green", Size::S, 1).unwrap()).unwrap();
    checkout.begin_checkout().unwrap();
    fill_forms(&mut checkout);
    checkout.address_mut().city = String::new();
    checkout.continue_to_shipping().unwrap();

    let err = checkout.continue_to_review().unwrap_err();
    assert_eq!(err.to_string(), "Please fill in required address fields");
    assert_eq!(checkout.step(), CheckoutStep::Shipping);
}

#[test]
fn test_edit_returns_to_earlier_step_keeping_forms() {
    let mut checkout = controller();
    checkout.add_to_cart(catalog::line_item("black", Size::M, 1).unwrap()).unwrap();
    checkout.begin_checkout().unwrap();
    fill_forms(&mut checkout);
    checkout.continue_to_shipping().unwrap();
    checkout.continue_to_review().unwrap();

    checkout.edit(CheckoutStep::Info).unwrap();
    assert_eq!(checkout.step(), CheckoutStep::Info);
    assert_eq!(checkout.customer().email, "shopper@example.com");
    assert_eq!(checkout.address().city, "Dublin");

    assert!(checkout.edit(CheckoutStep::Review).is_err());
}

// =============================================================================
// Stale Responses
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_order_response_after_close_is_discarded() {
    let mut checkout = controller();
    checkout.add_to_cart(catalog::line_item("black", Size::M, 2).unwrap()).unwrap();
    checkout.begin_checkout().unwrap();
    fill_forms(&mut checkout);
    checkout.continue_to_shipping().unwrap();
    checkout.continue_to_review().unwrap();

    let ticket = checkout.begin_place_order().unwrap();
    assert!(checkout.is_placing_order());
    assert!(matches!(
        checkout.begin_place_order(),
        Err(CheckoutError::OrderInFlight)
    ));

    let response = checkout
        .adapter()
        .place_order(ticket.cart(), ticket.customer(), ticket.address())
        .await;
    checkout.close();

    let outcome = checkout.complete_place_order(ticket, response).unwrap();
    assert!(outcome.is_stale());
    assert_eq!(checkout.step(), CheckoutStep::Review);
    assert_eq!(checkout.cart().item_count(), 2);
    assert!(checkout.order_id().is_none());
    assert!(!checkout.is_placing_order());
}

#[tokio::test(start_paused = true)]
async fn test_shipping_methods_after_close_are_discarded() {
    let mut checkout = controller();

    let ticket = checkout.begin_load_shipping_methods();
    let response = checkout.adapter().get_shipping_methods().await;
    checkout.close();

    let outcome = checkout
        .complete_load_shipping_methods(ticket, response)
        .unwrap();
    assert!(outcome.is_stale());
    assert!(checkout.shipping_methods().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_reopened_session_can_place_order() {
    let mut checkout = controller();
    checkout.add_to_cart(catalog::line_item("pink", Size::M, 1).unwrap()).unwrap();
    checkout.begin_checkout().unwrap();
    fill_forms(&mut checkout);
    checkout.continue_to_shipping().unwrap();
    checkout.continue_to_review().unwrap();

    checkout.close();
    assert_eq!(checkout.step(), CheckoutStep::Review);

    let outcome = checkout.place_order().await.unwrap();
    assert!(matches!(outcome, Outcome::Applied(_)));
    assert_eq!(checkout.step(), CheckoutStep::Success);
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_cart_serializes_camel_case_totals() {
    let mut checkout = controller();
    checkout.add_to_cart(catalog::line_item("black", Size::M, 1).unwrap()).unwrap();

    let json = serde_json::to_value(checkout.cart()).unwrap();
    assert_eq!(json["subtotalCents"], 6_000);
    assert_eq!(json["estimatedTaxCents"], 600);
    assert_eq!(json["totalCents"], 6_600);
    assert_eq!(json["lines"][0]["variantId"], "black-M");
}
