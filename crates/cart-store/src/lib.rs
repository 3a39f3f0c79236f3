//! # cart-store: Storage-Backed Cart Store
//!
//! The async shell around [`cart_core`]: owns the live cart, restores it
//! from device storage at startup, rewrites storage after every mutation,
//! and fans out changes to reactive consumers.
//!
//! ## Module Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          cart-store                                     │
//! │                                                                         │
//! │  ┌────────────┐   ┌──────────────────────┐   ┌───────────────────────┐  │
//! │  │   error    │   │       storage        │   │         store         │  │
//! │  │ Storage/   │   │  Storage trait       │   │  CartStore            │  │
//! │  │ StoreError │   │  MemoryStorage       │   │  open / add / inc /   │  │
//! │  │            │   │  FileStorage         │   │  dec / subscribe      │  │
//! │  └────────────┘   └──────────────────────┘   └───────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use cart_core::Product;
//! use cart_store::{CartStore, MemoryStorage};
//!
//! # async fn demo() -> Result<(), cart_store::StoreError> {
//! let store = CartStore::open(Arc::new(MemoryStorage::new())).await?;
//!
//! store.add_to_cart(&Product {
//!     id: "coffee".to_string(),
//!     title: "Whole Bean Coffee".to_string(),
//!     image_url: "https://img.example/coffee.png".to_string(),
//!     unit_price_cents: 1299,
//! }).await;
//!
//! assert_eq!(store.items().await.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod storage;
pub mod store;

pub use error::{StorageError, StoreError, StoreResult};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{CartStore, CartSummary, CART_STORAGE_KEY};

// Re-export the pure types consumers handle through this crate's API.
pub use cart_core::{Cart, CartItem, Product};
