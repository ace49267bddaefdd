//! Core types for the Affinity checkout.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod step;

pub use email::{ContactEmail, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, TaxRate};
pub use step::CheckoutStep;
