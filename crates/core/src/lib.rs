//! Affinity Core - Shared types library.
//!
//! This crate provides common types used across the Affinity checkout:
//! - `checkout` - Cart model, mock commerce adapter and checkout step controller
//! - `cli` - Command-line driver for quoting carts and running checkouts
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no async runtime,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, tax, emails and steps
//! - [`catalog`] - The static single-product catalog (colours, sizes, price)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::{CatalogError, ColorOption, NewCartItem, Size};
pub use types::*;

#[doc(hidden)]
pub mod __private {
    pub use uuid::Uuid;
}
