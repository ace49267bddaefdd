//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Every ID wraps an
//! opaque string; IDs declared with a prefix can also mint fresh values.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// Passing `prefix = "..."` additionally generates a `generate()` constructor
/// that mints `<prefix>_<uuid>` values.
///
/// # Example
///
/// ```rust
/// # use affinity_core::define_id;
/// define_id!(WishlistId, prefix = "wishlist");
/// define_id!(SkuId);
///
/// let wishlist = WishlistId::generate();
/// assert!(wishlist.as_str().starts_with("wishlist_"));
///
/// let sku = SkuId::new("black-M");
/// // These are different types, so this won't compile:
/// // let _: SkuId = wishlist;
/// # let _ = sku;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
    ($name:ident, prefix = $prefix:literal) => {
        $crate::define_id!($name);

        impl $name {
            /// Mint a fresh, globally unique ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, $crate::__private::Uuid::new_v4().simple()))
            }
        }
    };
}

define_id!(CartId, prefix = "cart");
define_id!(LineId, prefix = "line");
define_id!(VariantId);

impl VariantId {
    /// Build the composite variant key for a colour/size pair (e.g. `black-M`).
    #[must_use]
    pub fn from_parts(color_key: &str, size: &str) -> Self {
        Self(format!("{color_key}-{size}"))
    }
}

/// Human-facing order number in the form `ORD-####`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Prefix shared by every order number.
    pub const PREFIX: &'static str = "ORD-";

    /// Smallest order number ever issued.
    pub const MIN_NUMBER: u32 = 1000;

    /// Largest order number ever issued.
    pub const MAX_NUMBER: u32 = 9999;

    /// Create an order ID from a number.
    #[must_use]
    pub fn from_number(number: u32) -> Self {
        Self(format!("{}{number:04}", Self::PREFIX))
    }

    /// Generate a random four-digit order number.
    #[must_use]
    pub fn generate() -> Self {
        let number = rand::rng().random_range(Self::MIN_NUMBER..=Self::MAX_NUMBER);
        Self::from_number(number)
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `s` has the `ORD-####` shape.
    #[must_use]
    pub fn is_well_formed(s: &str) -> bool {
        s.strip_prefix(Self::PREFIX)
            .is_some_and(|digits| digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let a = CartId::generate();
        let b = CartId::generate();
        assert!(a.as_str().starts_with("cart_"));
        assert_ne!(a, b);
        assert!(LineId::generate().as_str().starts_with("line_"));
    }

    #[test]
    fn test_variant_from_parts() {
        assert_eq!(VariantId::from_parts("black", "M").as_str(), "black-M");
    }

    #[test]
    fn test_order_id_shape() {
        for _ in 0..100 {
            let id = OrderId::generate();
            assert!(OrderId::is_well_formed(id.as_str()), "bad order id {id}");
        }
        assert_eq!(OrderId::from_number(1234).as_str(), "ORD-1234");
        assert!(!OrderId::is_well_formed("ORD-12345"));
        assert!(!OrderId::is_well_formed("ORD-12a4"));
        assert!(!OrderId::is_well_formed("1234"));
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = LineId::new("line_1");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"line_1\""));
    }
}
