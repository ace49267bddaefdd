//! Checkout error types.
//!
//! [`ValidationError`] carries the inline messages shown next to a form when a
//! step gate rejects input; [`CheckoutError`] covers everything the controller
//! and adapter can report.

use thiserror::Error;

use affinity_core::{CheckoutStep, EmailError};

/// A step gate rejected the shopper's input.
///
/// The `Display` output is the message shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The contact email has no `@`.
    #[error("Please enter a valid email")]
    InvalidEmail(#[source] EmailError),

    /// One or more required address fields are empty.
    #[error("Please fill in required address fields")]
    MissingAddressFields(Vec<&'static str>),
}

/// Errors raised by the checkout controller and commerce adapters.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout cannot start with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A form gate rejected the input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested step change is not allowed from the current step.
    #[error("Cannot move from {from} to {to}")]
    InvalidTransition {
        /// Current step.
        from: CheckoutStep,
        /// Requested step.
        to: CheckoutStep,
    },

    /// An order submission is still awaiting its response.
    #[error("An order is already being placed")]
    OrderInFlight,

    /// The backend answered but did not accept the order.
    #[error("Order was not accepted")]
    OrderDeclined,

    /// The commerce backend failed.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type alias for `CheckoutError`.
pub type Result<T> = std::result::Result<T, CheckoutError>;
