//! Affinity checkout library.
//!
//! The cart model, the commerce adapter that owns all cart arithmetic, and the
//! step controller that drives the checkout drawer.
//!
//! # Architecture
//!
//! - [`cart`] - Immutable cart values and the pure functions that rebuild them
//! - [`adapter`] - The [`CheckoutAdapter`] seam and its in-memory mock
//! - [`controller`] - The `cart -> info -> shipping -> review -> success` step machine
//! - [`shipping`] / [`customer`] - Shipping catalog and checkout form state
//! - [`config`] / [`error`] - Environment configuration and error types
//!
//! Every cart operation returns a new [`Cart`]; the controller holds the only
//! mutable slot and replaces it wholesale.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod adapter;
pub mod cart;
pub mod config;
pub mod controller;
pub mod customer;
pub mod error;
pub mod shipping;

pub use adapter::{CheckoutAdapter, MockCheckoutAdapter, OrderConfirmation};
pub use cart::{Cart, CartItem};
pub use config::{CheckoutConfig, ConfigError};
pub use controller::{CheckoutController, OrderTicket, Outcome, ShippingMethodsTicket};
pub use customer::{CustomerInfo, ShippingAddress};
pub use error::{CheckoutError, Result, ValidationError};
pub use shipping::ShippingMethod;
