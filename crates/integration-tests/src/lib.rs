//! Integration tests for the Affinity checkout.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p affinity-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - The step machine driven end to end through the mock adapter
//! - `cart_properties` - Property tests for the cart arithmetic
