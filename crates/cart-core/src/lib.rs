//! # cart-core: Pure Cart State Logic
//!
//! This crate is the heart of marketcart. It contains the cart's entire
//! state-transition logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      marketcart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     UI Consumers                                │    │
//! │  │    Product list ──► Cart screen ──► Checkout                    │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                  cart-store (async shell)                       │    │
//! │  │    load, add_to_cart, increment, decrement, subscribe           │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ cart-core (THIS CRATE) ★                        │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────────────────────────┐              │    │
//! │  │   │   item    │  │            cart               │              │    │
//! │  │   │  Product  │  │  Cart: add_item / increment   │              │    │
//! │  │   │ CartItem  │  │        / decrement            │              │    │
//! │  │   └───────────┘  └───────────────────────────────┘              │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every transition is deterministic
//! 2. **No I/O**: storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: unit prices are cents (i64) to avoid float errors
//! 4. **Invariants Hold Everywhere**: no duplicate ids, no quantity below 1
//!
//! ## Example Usage
//!
//! ```rust
//! use cart_core::{Cart, Product};
//!
//! let mut cart = Cart::new();
//! let coffee = Product {
//!     id: "coffee".to_string(),
//!     title: "Whole Bean Coffee".to_string(),
//!     image_url: "https://img.example/coffee.png".to_string(),
//!     unit_price_cents: 1299,
//! };
//!
//! cart.add_item(&coffee); // new id: appended with quantity 1
//! cart.add_item(&coffee); // existing id: quantity bumped to 2
//! cart.decrement("coffee");
//!
//! assert_eq!(cart.total_quantity(), 1);
//! ```

pub mod cart;
pub mod item;

// Re-exports so users can do `use cart_core::Cart` instead of
// `use cart_core::cart::Cart`
pub use cart::Cart;
pub use item::{CartItem, Product};
