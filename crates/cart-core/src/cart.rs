//! # Cart State
//!
//! The ordered collection of cart items and its three state transitions.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart State Transitions                              │
//! │                                                                         │
//! │  Caller Action            Transition              State Change          │
//! │  ─────────────            ──────────              ────────────          │
//! │                                                                         │
//! │  Tap product ────────────► add_item() ──────────► push or qty + 1       │
//! │                                                                         │
//! │  Tap "+" ────────────────► increment() ─────────► items[i].qty += 1     │
//! │                                                                         │
//! │  Tap "−" ────────────────► decrement() ─────────► items[i].qty -= 1,    │
//! │                                                    removed at qty 0     │
//! │                                                                         │
//! │  NOTE: Transitions never fail. Unknown ids are no-ops on the sequence.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::item::{CartItem, Product};

/// The shopping cart: an insertion-ordered sequence of items, unique by id.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increases quantity)
/// - Quantity is always >= 1 (decrementing to 0 removes the item)
/// - Order reflects first addition; increment/decrement never reorder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from a deserialized item sequence.
    ///
    /// ## Untrusted Input
    /// Persisted snapshots come from outside the type system, so the
    /// invariants are enforced here rather than assumed:
    /// - entries with `quantity < 1` are dropped
    /// - for duplicate ids, the first occurrence wins
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            if item.quantity < 1 {
                continue;
            }
            if cart.find(&item.id).is_none() {
                cart.items.push(item);
            }
        }
        cart
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - If the product is already in the cart: quantity increases by 1
    ///   (identical to [`Cart::increment`] with that id)
    /// - Otherwise: appended to the end with quantity 1
    pub fn add_item(&mut self, product: &Product) {
        if let Some(item) = self.find_mut(&product.id) {
            item.quantity += 1;
            return;
        }
        self.items.push(CartItem::from_product(product));
    }

    /// Increases the quantity of the item matching `id` by exactly 1.
    ///
    /// Unknown ids leave the sequence unchanged.
    pub fn increment(&mut self, id: &str) {
        if let Some(item) = self.find_mut(id) {
            item.quantity += 1;
        }
    }

    /// Decreases the quantity of the item matching `id` by exactly 1.
    ///
    /// ## Behavior
    /// - An item reaching quantity 0 is removed from the sequence entirely
    /// - Unknown ids leave the sequence unchanged, so quantities can never
    ///   go below 0 (the item is already gone)
    pub fn decrement(&mut self, id: &str) {
        if let Some(item) = self.find_mut(id) {
            item.quantity -= 1;
        }
        self.items.retain(|i| i.quantity > 0);
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the number of unique items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the cart subtotal in cents.
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }
}
