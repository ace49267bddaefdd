//! Cart values and the pure functions that rebuild them.
//!
//! A [`Cart`] is never mutated in place. Every operation takes the current
//! cart by reference and returns a new one whose derived totals have been
//! recomputed from its lines and shipping charge.

use serde::Serialize;
use tracing::{debug, warn};

use affinity_core::{CartId, LineId, NewCartItem, TaxRate, VariantId};

use crate::shipping::ShippingMethod;

/// One line of the cart: a product variant at a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: LineId,
    pub variant_id: VariantId,
    pub title: String,
    pub color_key: String,
    pub size: String,
    pub unit_price_cents: i64,
    pub compare_at_cents: Option<i64>,
    /// Always at least 1; a line is removed rather than zeroed.
    pub quantity: u32,
    pub image_src: String,
}

impl CartItem {
    fn from_new(item: NewCartItem) -> Self {
        Self {
            id: LineId::generate(),
            variant_id: item.variant_id,
            title: item.title,
            color_key: item.color_key,
            size: item.size,
            unit_price_cents: item.unit_price_cents,
            compare_at_cents: item.compare_at_cents,
            quantity: item.quantity,
            image_src: item.image_src,
        }
    }

    /// `unit_price_cents * quantity`.
    #[must_use]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents.saturating_mul(i64::from(self.quantity))
    }
}

/// An immutable cart snapshot.
///
/// The monetary fields are derived from the lines and the shipping charge and
/// can only be produced by recomputation, so
/// `total == subtotal + estimated_tax + shipping` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    id: CartId,
    lines: Vec<CartItem>,
    subtotal_cents: i64,
    estimated_tax_cents: i64,
    shipping_cents: i64,
    total_cents: i64,
}

impl Cart {
    /// Cart identifier.
    #[must_use]
    pub const fn id(&self) -> &CartId {
        &self.id
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    /// Find a line by id.
    #[must_use]
    pub fn line(&self, line_id: &LineId) -> Option<&CartItem> {
        self.lines.iter().find(|l| &l.id == line_id)
    }

    /// Find the line holding a variant.
    #[must_use]
    pub fn line_for_variant(&self, variant_id: &VariantId) -> Option<&CartItem> {
        self.lines.iter().find(|l| &l.variant_id == variant_id)
    }

    #[must_use]
    pub const fn subtotal_cents(&self) -> i64 {
        self.subtotal_cents
    }

    #[must_use]
    pub const fn estimated_tax_cents(&self) -> i64 {
        self.estimated_tax_cents
    }

    #[must_use]
    pub const fn shipping_cents(&self) -> i64 {
        self.shipping_cents
    }

    #[must_use]
    pub const fn total_cents(&self) -> i64 {
        self.total_cents
    }

    /// Total number of units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns `true` if this cart has no lines and all totals are zero.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.lines.is_empty()
            && self.subtotal_cents == 0
            && self.estimated_tax_cents == 0
            && self.shipping_cents == 0
            && self.total_cents == 0
    }
}

/// Create an empty cart with a fresh id.
#[must_use]
pub fn create_cart() -> Cart {
    Cart {
        id: CartId::generate(),
        lines: Vec::new(),
        subtotal_cents: 0,
        estimated_tax_cents: 0,
        shipping_cents: 0,
        total_cents: 0,
    }
}

/// Add an item, merging it into an existing line for the same variant.
///
/// A merged line keeps its own price and descriptors; only the quantity grows.
/// An item with a zero quantity leaves the lines unchanged.
#[must_use]
pub fn add_line_item(cart: &Cart, item: NewCartItem, tax_rate: TaxRate) -> Cart {
    let mut lines = cart.lines.clone();

    if item.quantity == 0 {
        debug!(variant_id = %item.variant_id, "ignoring add of zero quantity");
    } else if let Some(line) = lines.iter_mut().find(|l| l.variant_id == item.variant_id) {
        line.quantity = line.quantity.saturating_add(item.quantity);
    } else {
        lines.push(CartItem::from_new(item));
    }

    recalculate(cart.id.clone(), lines, cart.shipping_cents, tax_rate)
}

/// Set a line's quantity, removing the line when `quantity <= 0`.
///
/// Positive quantities are taken as-is (saturating at `u32::MAX`). An unknown
/// line id leaves the lines unchanged.
#[must_use]
pub fn update_line_item_qty(
    cart: &Cart,
    line_id: &LineId,
    quantity: i64,
    tax_rate: TaxRate,
) -> Cart {
    let lines = if quantity <= 0 {
        cart.lines
            .iter()
            .filter(|l| &l.id != line_id)
            .cloned()
            .collect()
    } else {
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        cart.lines
            .iter()
            .map(|l| {
                if &l.id == line_id {
                    CartItem {
                        quantity,
                        ..l.clone()
                    }
                } else {
                    l.clone()
                }
            })
            .collect()
    };

    recalculate(cart.id.clone(), lines, cart.shipping_cents, tax_rate)
}

/// Apply a shipping method's price to the cart.
///
/// An id missing from `methods` silently falls back to free shipping.
#[must_use]
pub fn set_shipping_method(
    cart: &Cart,
    method_id: &str,
    methods: &[ShippingMethod],
    tax_rate: TaxRate,
) -> Cart {
    let shipping_cents = methods
        .iter()
        .find(|m| m.id == method_id)
        .map_or_else(
            || {
                warn!(method_id, "unknown shipping method, charging nothing");
                0
            },
            |m| m.price_cents,
        );

    recalculate(cart.id.clone(), cart.lines.clone(), shipping_cents, tax_rate)
}

/// Rebuild a cart's derived totals from its lines and shipping charge.
fn recalculate(id: CartId, lines: Vec<CartItem>, shipping_cents: i64, tax_rate: TaxRate) -> Cart {
    let subtotal_cents = lines
        .iter()
        .map(CartItem::line_total_cents)
        .fold(0_i64, i64::saturating_add);
    let estimated_tax_cents = tax_rate.apply(subtotal_cents);
    let total_cents = subtotal_cents
        .saturating_add(estimated_tax_cents)
        .saturating_add(shipping_cents);

    debug!(
        cart_id = %id,
        lines = lines.len(),
        subtotal_cents,
        estimated_tax_cents,
        shipping_cents,
        total_cents,
        "recalculated cart"
    );

    Cart {
        id,
        lines,
        subtotal_cents,
        estimated_tax_cents,
        shipping_cents,
        total_cents,
    }
}
