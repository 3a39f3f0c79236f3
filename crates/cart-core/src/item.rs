//! # Cart Item Types
//!
//! The data model for a single cart line entry.

use serde::{Deserialize, Serialize};

/// Product data supplied by the caller when adding to the cart.
///
/// ## Design Notes
/// - `id` is externally supplied (e.g. a catalog product identifier) and is
///   the uniqueness key inside the cart.
/// - `unit_price_cents`: price in integer cents. Never floats for money.
/// - No validation is performed on these fields; the caller is trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier (uniqueness key in the cart)
    pub id: String,

    /// Display title
    pub title: String,

    /// Display image URL
    pub image_url: String,

    /// Unit price in cents
    pub unit_price_cents: i64,
}

/// One product line entry in the cart.
///
/// ## Invariants
/// - `quantity >= 1` whenever the item is present in a [`crate::Cart`].
///   An item whose quantity reaches 0 is removed, never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identifier (uniqueness key)
    pub id: String,

    /// Product title at time of adding
    pub title: String,

    /// Product image URL at time of adding
    pub image_url: String,

    /// Unit price in cents at time of adding (frozen when added)
    pub unit_price_cents: i64,

    /// Quantity in cart (always >= 1)
    pub quantity: i64,
}

impl CartItem {
    /// Creates a new cart item from a product, with quantity 1.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the catalog price changes
    /// later, this cart item retains the price it was added at.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            id: product.id.clone(),
            title: product.title.clone(),
            image_url: product.image_url.clone(),
            unit_price_cents: product.unit_price_cents,
            quantity: 1,
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}
