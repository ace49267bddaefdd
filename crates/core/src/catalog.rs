//! The static single-product catalog.
//!
//! The storefront sells exactly one garment in a fixed sequence of colours and
//! sizes. Nothing here is user-editable: the catalog is compiled in and the
//! checkout treats it as read-only input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::VariantId;

/// Display title of the product; line titles are `"{colour label} Hoodie"`.
pub const PRODUCT_TITLE: &str = "Hoodie";

/// Selling price of every variant, in cents.
pub const UNIT_PRICE_CENTS: i64 = 6_000;

/// Struck-through "was" price shown next to the selling price, in cents.
pub const COMPARE_AT_CENTS: i64 = 7_500;

/// Errors building a cart line from catalog selections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown colour: {0}")]
    UnknownColor(String),
    #[error("unknown size: {0}")]
    UnknownSize(String),
    #[error("size {0} is not available")]
    SizeUnavailable(Size),
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// One entry of the colour carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorOption {
    /// Stable key used in variant ids (e.g. `darkblue`).
    pub key: &'static str,
    /// Shopper-facing label (e.g. `Dark Blue`).
    pub label: &'static str,
    /// Product image path.
    pub image: &'static str,
}

/// Ordered colour sequence; cycling always advances forward through it.
pub static COLOR_SEQUENCE: [ColorOption; 6] = [
    ColorOption {
        key: "black",
        label: "Black",
        image: "/affinity-black.png",
    },
    ColorOption {
        key: "darkblue",
        label: "Dark Blue",
        image: "/affinity-darkblue.png",
    },
    ColorOption {
        key: "blue",
        label: "Blue",
        image: "/affinity-blue.png",
    },
    ColorOption {
        key: "gray",
        label: "Gray",
        image: "/affinity-gray.png",
    },
    ColorOption {
        key: "green",
        label: "Green",
        image: "/affinity-green.png",
    },
    ColorOption {
        key: "pink",
        label: "Pink",
        image: "/affinity-pink.png",
    },
];

impl ColorOption {
    /// Look up a colour by key.
    #[must_use]
    pub fn find(key: &str) -> Option<&'static Self> {
        COLOR_SEQUENCE.iter().find(|c| c.key == key)
    }

    /// The colour after this one, wrapping back to the start.
    #[must_use]
    pub fn next(&self) -> &'static Self {
        let [first, ..] = &COLOR_SEQUENCE;
        COLOR_SEQUENCE
            .iter()
            .skip_while(|c| c.key != self.key)
            .nth(1)
            .unwrap_or(first)
    }
}

/// Garment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    S,
    M,
    L,
    XL,
}

impl Size {
    /// All sizes in display order.
    pub const ALL: [Self; 4] = [Self::S, Self::M, Self::L, Self::XL];

    /// Sizes greyed out on the size picker. Every size is in stock.
    pub const SOLD_OUT: [Self; 0] = [];

    /// Whether the size can currently be ordered.
    #[must_use]
    pub fn is_available(self) -> bool {
        !Self::SOLD_OUT.contains(&self)
    }

    /// Size label as shown on the size picker.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Size {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "XL" => Ok(Self::XL),
            _ => Err(CatalogError::UnknownSize(s.to_string())),
        }
    }
}

/// A cart line that has not been assigned a line id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub variant_id: VariantId,
    pub title: String,
    pub color_key: String,
    pub size: String,
    pub unit_price_cents: i64,
    pub compare_at_cents: Option<i64>,
    pub quantity: u32,
    pub image_src: String,
}

/// Build the add-to-cart input for a colour, size and quantity.
///
/// # Errors
///
/// Returns an error for an unknown colour, an unavailable size, or a zero
/// quantity.
pub fn line_item(color_key: &str, size: Size, quantity: u32) -> Result<NewCartItem, CatalogError> {
    let color =
        ColorOption::find(color_key).ok_or_else(|| CatalogError::UnknownColor(color_key.into()))?;

    if !size.is_available() {
        return Err(CatalogError::SizeUnavailable(size));
    }

    if quantity == 0 {
        return Err(CatalogError::ZeroQuantity);
    }

    Ok(NewCartItem {
        variant_id: VariantId::from_parts(color.key, size.as_str()),
        title: format!("{} {PRODUCT_TITLE}", color.label),
        color_key: color.key.to_string(),
        size: size.as_str().to_string(),
        unit_price_cents: UNIT_PRICE_CENTS,
        compare_at_cents: Some(COMPARE_AT_CENTS),
        quantity,
        image_src: color.image.to_string(),
    })
}
