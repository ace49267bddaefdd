//! Shipping method catalog.

use serde::{Deserialize, Serialize};

/// Id of the free default method.
pub const STANDARD: &str = "standard";

/// Id of the paid next-day-ish method.
pub const EXPRESS: &str = "express";

/// A shipping option offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    pub id: String,
    pub label: String,
    pub price_cents: i64,
    pub description: Option<String>,
}

impl ShippingMethod {
    fn new(id: &str, label: &str, price_cents: i64, description: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            price_cents,
            description: Some(description.to_string()),
        }
    }

    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.price_cents == 0
    }
}

/// The fixed set of shipping methods, in display order.
#[must_use]
pub fn catalog() -> Vec<ShippingMethod> {
    vec![
        ShippingMethod::new(STANDARD, "Standard Shipping", 0, "3-5 business days"),
        ShippingMethod::new(EXPRESS, "Express Shipping", 1_500, "1-2 business days"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let methods = catalog();
        assert_eq!(methods.len(), 2);
        assert!(methods.iter().any(|m| m.id == STANDARD && m.is_free()));
        assert!(
            methods
                .iter()
                .any(|m| m.id == EXPRESS && m.price_cents == 1_500)
        );
    }
}
