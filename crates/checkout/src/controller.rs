//! Checkout step controller.
//!
//! [`CheckoutController`] owns one checkout session: the current cart, the
//! current step, and the form state. Cart changes go through the adapter and
//! replace the held cart wholesale; step changes go through gates that
//! validate the form data for the step being left.
//!
//! ```text
//! cart --begin_checkout--> info --continue_to_shipping--> shipping
//!      --continue_to_review--> review --place_order--> success --dismiss--> cart
//! ```
//!
//! # Stale responses
//!
//! Asynchronous calls are split into `begin_*` (which hands out a ticket) and
//! `complete_*` (which applies the response). A ticket records the session
//! generation at call time; the generation moves on every cart replacement and
//! on [`CheckoutController::close`], and a response whose ticket no longer
//! matches is discarded as [`Outcome::Stale`]. Shipping-method tickets are
//! tied to the session epoch instead, which only `close` advances.

use tracing::{debug, info, instrument, warn};

use affinity_core::{CheckoutStep, LineId, NewCartItem, OrderId};

use crate::adapter::{CheckoutAdapter, OrderConfirmation};
use crate::cart::Cart;
use crate::config::CheckoutConfig;
use crate::customer::{CustomerInfo, ShippingAddress};
use crate::error::{CheckoutError, Result};
use crate::shipping::ShippingMethod;

/// Whether an asynchronous response was applied to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The response was current and has been applied.
    Applied(T),
    /// The session moved on while the call was in flight; nothing changed.
    Stale,
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }

    /// The applied value, if any.
    #[must_use]
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Stale => None,
        }
    }
}

/// A submitted order awaiting its backend response.
///
/// Holds a snapshot of what was submitted so the caller can drive the adapter
/// without borrowing the controller.
#[derive(Debug, Clone)]
pub struct OrderTicket {
    serial: u64,
    generation: u64,
    cart: Cart,
    customer: CustomerInfo,
    address: ShippingAddress,
}

impl OrderTicket {
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    #[must_use]
    pub const fn address(&self) -> &ShippingAddress {
        &self.address
    }
}

/// A shipping-methods request awaiting its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingMethodsTicket {
    epoch: u64,
}

/// One shopper's checkout session.
#[derive(Debug)]
pub struct CheckoutController<A> {
    adapter: A,
    cart: Cart,
    step: CheckoutStep,
    customer: CustomerInfo,
    address: ShippingAddress,
    shipping_method_id: String,
    default_shipping_method: String,
    shipping_methods: Vec<ShippingMethod>,
    order_id: Option<OrderId>,
    pending_order: Option<u64>,
    next_serial: u64,
    generation: u64,
    epoch: u64,
}

impl<A: CheckoutAdapter> CheckoutController<A> {
    /// Start a session with an empty cart on the cart step.
    ///
    /// The configured default shipping method is applied to the cart straight
    /// away, so the selection and the shipping charge agree from the start.
    #[must_use]
    pub fn new(adapter: A, config: &CheckoutConfig) -> Self {
        let cart =
            adapter.set_shipping_method(&adapter.create_cart(), &config.default_shipping_method);
        Self {
            adapter,
            cart,
            step: CheckoutStep::Cart,
            customer: CustomerInfo::default(),
            address: ShippingAddress::with_country(config.default_country.clone()),
            shipping_method_id: config.default_shipping_method.clone(),
            default_shipping_method: config.default_shipping_method.clone(),
            shipping_methods: Vec::new(),
            order_id: None,
            pending_order: None,
            next_serial: 0,
            generation: 0,
            epoch: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn adapter(&self) -> &A {
        &self.adapter
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    #[must_use]
    pub const fn address(&self) -> &ShippingAddress {
        &self.address
    }

    /// Id of the selected shipping method.
    #[must_use]
    pub fn shipping_method_id(&self) -> &str {
        &self.shipping_method_id
    }

    /// Shipping methods loaded so far (empty until the first load completes).
    #[must_use]
    pub fn shipping_methods(&self) -> &[ShippingMethod] {
        &self.shipping_methods
    }

    /// Order number of the most recent successful order.
    #[must_use]
    pub const fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    /// Whether an order submission is awaiting its response.
    #[must_use]
    pub const fn is_placing_order(&self) -> bool {
        self.pending_order.is_some()
    }

    /// Current session generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    // =========================================================================
    // Cart
    // =========================================================================

    fn replace_cart(&mut self, cart: Cart) {
        self.cart = cart;
        self.generation += 1;
        debug!(
            cart_id = %self.cart.id(),
            generation = self.generation,
            total_cents = self.cart.total_cents(),
            "cart replaced"
        );
    }

    /// A fresh cart carrying the default shipping method, which also becomes
    /// the selection again.
    fn reset_cart(&mut self) {
        let cart = self
            .adapter
            .set_shipping_method(&self.adapter.create_cart(), &self.default_shipping_method);
        self.shipping_method_id.clone_from(&self.default_shipping_method);
        self.replace_cart(cart);
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.is_placing_order() {
            return Err(CheckoutError::OrderInFlight);
        }
        Ok(())
    }

    /// Add an item to the cart.
    ///
    /// # Errors
    ///
    /// `OrderInFlight` while an order is being placed.
    pub fn add_to_cart(&mut self, item: NewCartItem) -> Result<&Cart> {
        self.ensure_idle()?;
        let cart = self.adapter.add_line_item(&self.cart, item);
        self.replace_cart(cart);
        Ok(&self.cart)
    }

    /// Change a line's quantity; `<= 0` removes it.
    ///
    /// # Errors
    ///
    /// `OrderInFlight` while an order is being placed.
    pub fn update_quantity(&mut self, line_id: &LineId, quantity: i64) -> Result<&Cart> {
        self.ensure_idle()?;
        let cart = self.adapter.update_line_item_qty(&self.cart, line_id, quantity);
        self.replace_cart(cart);
        Ok(&self.cart)
    }

    /// Select a shipping method and apply its price to the cart.
    ///
    /// # Errors
    ///
    /// `OrderInFlight` while an order is being placed.
    pub fn select_shipping_method(&mut self, method_id: &str) -> Result<&Cart> {
        self.ensure_idle()?;
        method_id.clone_into(&mut self.shipping_method_id);
        let cart = self.adapter.set_shipping_method(&self.cart, method_id);
        self.replace_cart(cart);
        Ok(&self.cart)
    }

    // =========================================================================
    // Form state
    // =========================================================================

    pub fn set_customer(&mut self, customer: CustomerInfo) {
        self.customer = customer;
    }

    pub const fn customer_mut(&mut self) -> &mut CustomerInfo {
        &mut self.customer
    }

    pub fn set_shipping_address(&mut self, address: ShippingAddress) {
        self.address = address;
    }

    pub const fn address_mut(&mut self) -> &mut ShippingAddress {
        &mut self.address
    }

    // =========================================================================
    // Step transitions
    // =========================================================================

    fn transition(&mut self, to: CheckoutStep) {
        info!(from = %self.step, to = %to, cart_id = %self.cart.id(), "checkout step changed");
        self.step = to;
    }

    fn require_step(&self, expected: CheckoutStep, to: CheckoutStep) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::InvalidTransition {
                from: self.step,
                to,
            })
        }
    }

    /// `cart -> info`. Refused while the cart is empty.
    ///
    /// # Errors
    ///
    /// `EmptyCart` for an empty cart, `InvalidTransition` off the cart step.
    pub fn begin_checkout(&mut self) -> Result<()> {
        self.require_step(CheckoutStep::Cart, CheckoutStep::Info)?;
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.transition(CheckoutStep::Info);
        Ok(())
    }

    /// `info -> shipping`, gated on the contact email containing `@`.
    ///
    /// # Errors
    ///
    /// `Validation(InvalidEmail)` when the gate fails, `InvalidTransition` off
    /// the info step.
    pub fn continue_to_shipping(&mut self) -> Result<()> {
        self.require_step(CheckoutStep::Info, CheckoutStep::Shipping)?;
        if let Err(err) = self.customer.contact_email() {
            debug!(error = %err, "contact step rejected");
            return Err(err.into());
        }
        self.transition(CheckoutStep::Shipping);
        Ok(())
    }

    /// `shipping -> review`, gated on address line 1, city and postal code.
    ///
    /// # Errors
    ///
    /// `Validation(MissingAddressFields)` when the gate fails,
    /// `InvalidTransition` off the shipping step.
    pub fn continue_to_review(&mut self) -> Result<()> {
        self.require_step(CheckoutStep::Shipping, CheckoutStep::Review)?;
        if let Err(err) = self.address.validate() {
            debug!(error = %err, "shipping step rejected");
            return Err(err.into());
        }
        self.transition(CheckoutStep::Review);
        Ok(())
    }

    /// Jump back to an earlier step, keeping everything already entered.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the current step is a form step and `target`
    /// comes before it; `OrderInFlight` while an order is being placed.
    pub fn edit(&mut self, target: CheckoutStep) -> Result<()> {
        self.ensure_idle()?;
        if !self.step.is_editable() || !target.is_before(self.step) {
            return Err(CheckoutError::InvalidTransition {
                from: self.step,
                to: target,
            });
        }
        self.transition(target);
        Ok(())
    }

    /// `success -> cart`. The cart was already emptied when the order went
    /// through.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` off the success step.
    pub fn dismiss(&mut self) -> Result<()> {
        self.require_step(CheckoutStep::Success, CheckoutStep::Cart)?;
        self.transition(CheckoutStep::Cart);
        Ok(())
    }

    /// Tear the session down. In-flight responses will be discarded.
    ///
    /// The step and form data are kept so a reopened drawer resumes where the
    /// shopper left off.
    pub fn close(&mut self) {
        self.generation += 1;
        self.epoch += 1;
        self.pending_order = None;
        info!(
            generation = self.generation,
            step = %self.step,
            "checkout session closed"
        );
    }

    // =========================================================================
    // Order placement
    // =========================================================================

    /// Submit the order from the review step.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` off the review step, `EmptyCart` for an empty cart,
    /// `OrderInFlight` if a submission is already pending.
    pub fn begin_place_order(&mut self) -> Result<OrderTicket> {
        self.require_step(CheckoutStep::Review, CheckoutStep::Success)?;
        self.ensure_idle()?;
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let serial = self.next_serial;
        self.next_serial += 1;
        self.pending_order = Some(serial);

        Ok(OrderTicket {
            serial,
            generation: self.generation,
            cart: self.cart.clone(),
            customer: self.customer.clone(),
            address: self.address.clone(),
        })
    }

    /// Apply the backend's answer to a submitted order.
    ///
    /// On success the held cart is replaced by a fresh empty cart carrying the
    /// default shipping method first, then the order number is recorded and
    /// the step moves to `success`.
    ///
    /// # Errors
    ///
    /// The backend's error, or `OrderDeclined` if it answered without
    /// accepting the order. Either way the session stays on `review`.
    pub fn complete_place_order(
        &mut self,
        ticket: OrderTicket,
        result: Result<OrderConfirmation>,
    ) -> Result<Outcome<OrderId>> {
        if self.pending_order == Some(ticket.serial) {
            self.pending_order = None;
        }

        if ticket.generation != self.generation {
            warn!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "discarding stale order response"
            );
            return Ok(Outcome::Stale);
        }

        let confirmation = result.inspect_err(|err| {
            warn!(error = %err, "order placement failed");
        })?;

        if !confirmation.success {
            warn!(order_id = %confirmation.order_id, "order declined");
            return Err(CheckoutError::OrderDeclined);
        }

        self.reset_cart();
        self.order_id = Some(confirmation.order_id.clone());
        self.transition(CheckoutStep::Success);

        Ok(Outcome::Applied(confirmation.order_id))
    }

    /// Submit the order and wait for the backend.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_place_order`] and [`Self::complete_place_order`].
    #[instrument(skip(self), fields(cart_id = %self.cart.id()))]
    pub async fn place_order(&mut self) -> Result<Outcome<OrderId>> {
        let ticket = self.begin_place_order()?;
        let result = self
            .adapter
            .place_order(&ticket.cart, &ticket.customer, &ticket.address)
            .await;
        self.complete_place_order(ticket, result)
    }

    // =========================================================================
    // Shipping methods
    // =========================================================================

    #[must_use]
    pub const fn begin_load_shipping_methods(&self) -> ShippingMethodsTicket {
        ShippingMethodsTicket { epoch: self.epoch }
    }

    /// Store a loaded shipping-method list.
    ///
    /// # Errors
    ///
    /// The backend's error for a current ticket.
    pub fn complete_load_shipping_methods(
        &mut self,
        ticket: ShippingMethodsTicket,
        result: Result<Vec<ShippingMethod>>,
    ) -> Result<Outcome<()>> {
        if ticket.epoch != self.epoch {
            debug!(
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "discarding stale shipping methods"
            );
            return Ok(Outcome::Stale);
        }

        self.shipping_methods = result?;
        Ok(Outcome::Applied(()))
    }

    /// Fetch the shipping methods and keep them for the shipping step.
    ///
    /// # Errors
    ///
    /// The backend's error.
    #[instrument(skip(self))]
    pub async fn load_shipping_methods(&mut self) -> Result<Outcome<()>> {
        let ticket = self.begin_load_shipping_methods();
        let result = self.adapter.get_shipping_methods().await;
        self.complete_load_shipping_methods(ticket, result)
    }
}
