//! # Cart Store
//!
//! The storage-backed cart state container handed to UI consumers.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Store Operations                              │
//! │                                                                         │
//! │  Consumer Action        Store Method          Effect                    │
//! │  ───────────────        ────────────          ──────                    │
//! │                                                                         │
//! │  App startup ──────────► open() ────────────► storage.get, restore      │
//! │                                                                         │
//! │  Tap product ──────────► add_to_cart() ─────► mutate + persist + notify │
//! │                                                                         │
//! │  Tap "+" ──────────────► increment() ───────► mutate + persist + notify │
//! │                                                                         │
//! │  Tap "−" ──────────────► decrement() ───────► mutate + persist + notify │
//! │                                                                         │
//! │  Render cart ──────────► items() / subscribe()                          │
//! │                                                                         │
//! │  NOTE: One async mutex is held across mutate + persist, so the bytes    │
//! │        written to storage always come from the transition that just     │
//! │        ran, and back-to-back calls serialize instead of racing.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! - `open`: a storage **read** failure is a hard error (no store handed out).
//!   A missing snapshot means an empty cart; a malformed snapshot is logged
//!   and treated as empty rather than poisoning startup.
//! - Mutations: a storage **write** failure is logged and swallowed. The
//!   in-memory update stands and consumers are still notified; storage
//!   catches up on the next successful write, since every write is the full
//!   current sequence.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, warn};

use cart_core::{Cart, CartItem, Product};

use crate::error::{StoreError, StoreResult};
use crate::storage::Storage;

/// The fixed storage slot holding the serialized cart.
///
/// Only this store reads or writes the key.
pub const CART_STORAGE_KEY: &str = "@marketplace:cart";

/// Cart summary for display surfaces (badges, footers).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: cart.subtotal_cents(),
        }
    }
}

/// The storage-backed cart store.
///
/// ## Construction
/// There is no `new()`: the only way to obtain a store is [`CartStore::open`],
/// which performs the one-time load. Code that skipped initialization simply
/// has no store to call — the "must be initialized before use" contract is
/// enforced by construction, not by a runtime check.
///
/// ## Thread Safety
/// The cart sits behind a `tokio::sync::Mutex` (not `std::sync::Mutex`)
/// because the lock is held across the storage write, an await point.
/// Share the store itself via `Arc<CartStore>`.
pub struct CartStore {
    storage: Arc<dyn Storage>,
    cart: Mutex<Cart>,
    changes: watch::Sender<Vec<CartItem>>,
}

impl CartStore {
    /// Opens the cart store, restoring any persisted cart from `storage`.
    ///
    /// ## Behavior
    /// - No value under [`CART_STORAGE_KEY`]: starts empty
    /// - Malformed value: starts empty, logs a warning (the snapshot is
    ///   display state, not a ledger — losing it beats failing startup)
    /// - Storage read failure: returns [`StoreError::Storage`]
    pub async fn open(storage: Arc<dyn Storage>) -> StoreResult<Self> {
        let cart = match storage.get(CART_STORAGE_KEY).await? {
            Some(raw) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => Cart::from_items(items),
                Err(e) => {
                    warn!(error = %e, "malformed cart snapshot, starting empty");
                    Cart::new()
                }
            },
            None => Cart::new(),
        };

        debug!(items = cart.item_count(), "cart store opened");
        let (changes, _) = watch::channel(cart.items().to_vec());
        Ok(CartStore {
            storage,
            cart: Mutex::new(cart),
            changes,
        })
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by 1
    /// - Otherwise: appended with quantity 1, keeping insertion order
    /// - The updated sequence is persisted before the call resolves
    pub async fn add_to_cart(&self, product: &Product) {
        debug!(id = %product.id, "add_to_cart");
        self.mutate(|cart| cart.add_item(product)).await;
    }

    /// Increases the quantity of the item matching `id` by 1.
    ///
    /// Unknown ids leave the sequence unchanged, but the (unchanged)
    /// sequence is still written back to storage.
    pub async fn increment(&self, id: &str) {
        debug!(id = %id, "increment");
        self.mutate(|cart| cart.increment(id)).await;
    }

    /// Decreases the quantity of the item matching `id` by 1, removing the
    /// item entirely when it reaches 0.
    ///
    /// Unknown ids leave the sequence unchanged, but the (unchanged)
    /// sequence is still written back to storage.
    pub async fn decrement(&self, id: &str) {
        debug!(id = %id, "decrement");
        self.mutate(|cart| cart.decrement(id)).await;
    }

    /// Returns a snapshot of the current items in insertion order.
    pub async fn items(&self) -> Vec<CartItem> {
        self.cart.lock().await.items().to_vec()
    }

    /// Returns the current cart summary.
    pub async fn summary(&self) -> CartSummary {
        CartSummary::from(&*self.cart.lock().await)
    }

    /// Subscribes to cart changes.
    ///
    /// The receiver holds the current item sequence immediately and is
    /// updated after every mutation resolves. Dropping all receivers is
    /// fine; notification is best-effort fan-out, not a required consumer.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.changes.subscribe()
    }

    /// Applies one transition and persists the exact state it produced.
    ///
    /// The lock is held from before the transition until after the storage
    /// write: the persisted bytes can never be a stale snapshot from an
    /// earlier version of the cart, and concurrent callers serialize.
    async fn mutate(&self, transition: impl FnOnce(&mut Cart)) {
        let mut cart = self.cart.lock().await;
        transition(&mut cart);
        self.persist(&cart).await;
        self.changes.send_replace(cart.items().to_vec());
    }

    /// Writes the full current sequence to storage.
    ///
    /// Write failures are logged and swallowed: mutations never surface
    /// storage errors to callers, and the next successful write restores
    /// consistency because every write is the complete sequence.
    async fn persist(&self, cart: &Cart) {
        let raw = match serde_json::to_string(cart) {
            Ok(raw) => raw,
            Err(e) => {
                // Vec<CartItem> has no non-serializable states; keep the
                // in-memory update if this ever trips anyway.
                error!(error = %e, "failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &raw).await {
            error!(error = %e, "failed to persist cart, keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;

    /// Opt-in log output for tests: `RUST_LOG=debug cargo test`.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {}", id),
            image_url: format!("https://img.example/{}.png", id),
            unit_price_cents: price_cents,
        }
    }

    async fn open_empty() -> (Arc<MemoryStorage>, CartStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::open(storage.clone()).await.unwrap();
        (storage, store)
    }

    /// Reads the persisted snapshot back out of storage.
    async fn persisted_items(storage: &MemoryStorage) -> Vec<CartItem> {
        let raw = storage
            .get(CART_STORAGE_KEY)
            .await
            .unwrap()
            .expect("cart snapshot missing");
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_open_with_missing_key_starts_empty() {
        let (_, store) = open_empty().await;
        assert!(store.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_open_restores_persisted_items_in_order() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let store = CartStore::open(storage.clone()).await.unwrap();
            store.add_to_cart(&test_product("a", 100)).await;
            store.add_to_cart(&test_product("b", 200)).await;
            store.increment("b").await;
        }

        // fresh session against the same storage
        let store = CartStore::open(storage).await.unwrap();
        let items = store.items().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[1].id, "b");
        assert_eq!(items[1].quantity, 2);
    }

    #[tokio::test]
    async fn test_open_with_malformed_snapshot_starts_empty() {
        init_tracing();
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CART_STORAGE_KEY, "not json{{").await.unwrap();

        let store = CartStore::open(storage).await.unwrap();
        assert!(store.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_open_sanitizes_invalid_persisted_quantities() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                CART_STORAGE_KEY,
                r#"[{"id":"a","title":"A","imageUrl":"u","unitPriceCents":100,"quantity":0},
                    {"id":"b","title":"B","imageUrl":"u","unitPriceCents":200,"quantity":2}]"#,
            )
            .await
            .unwrap();

        let store = CartStore::open(storage).await.unwrap();
        let items = store.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "b");
    }

    #[tokio::test]
    async fn test_every_mutation_persists_current_sequence() {
        let (storage, store) = open_empty().await;

        store.add_to_cart(&test_product("a", 1000)).await;
        assert_eq!(persisted_items(&storage).await.len(), 1);

        store.increment("a").await;
        assert_eq!(persisted_items(&storage).await[0].quantity, 2);

        store.decrement("a").await;
        store.decrement("a").await;
        assert!(persisted_items(&storage).await.is_empty());
    }

    #[tokio::test]
    async fn test_noop_mutation_still_writes_storage() {
        let (storage, store) = open_empty().await;
        store.add_to_cart(&test_product("a", 1000)).await;

        // wipe the slot, then run a no-op mutation
        storage.remove(CART_STORAGE_KEY).await.unwrap();
        store.increment("ghost").await;

        // the unchanged sequence was written back
        let items = persisted_items(&storage).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "a");
    }

    #[tokio::test]
    async fn test_add_existing_id_merges_instead_of_duplicating() {
        let (_, store) = open_empty().await;
        store.add_to_cart(&test_product("a", 1000)).await;
        store.add_to_cart(&test_product("a", 1000)).await;

        let items = store.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_summary_tracks_cart() {
        let (_, store) = open_empty().await;
        store.add_to_cart(&test_product("a", 250)).await;
        store.add_to_cart(&test_product("b", 100)).await;
        store.increment("a").await;

        let summary = store.summary().await;
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.subtotal_cents, 600);
    }

    #[tokio::test]
    async fn test_subscriber_sees_each_new_state() {
        let (_, store) = open_empty().await;
        let mut rx = store.subscribe();
        assert!(rx.borrow().is_empty());

        store.add_to_cart(&test_product("a", 1000)).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update()[0].quantity, 1);

        store.increment("a").await;
        assert_eq!(rx.borrow_and_update()[0].quantity, 2);

        store.decrement("a").await;
        assert!(rx.borrow_and_update().is_empty());
    }

    #[tokio::test]
    async fn test_rapid_fire_calls_persist_the_final_state() {
        let (storage, store) = open_empty().await;
        let store = Arc::new(store);

        let mut tasks = Vec::new();
        for _ in 0..10 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.add_to_cart(&test_product("a", 100)).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        // all ten adds are visible in memory AND in the final snapshot
        let items = store.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 10);
        assert_eq!(persisted_items(&storage).await[0].quantity, 10);
    }

    /// Storage whose writes always fail; reads come from an inner map.
    #[derive(Default)]
    struct WriteFailStorage {
        inner: MemoryStorage,
    }

    #[async_trait]
    impl Storage for WriteFailStorage {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed("disk full".to_string()))
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_write_failure_keeps_in_memory_state_and_notifies() {
        init_tracing();
        let storage = Arc::new(WriteFailStorage::default());
        let store = CartStore::open(storage).await.unwrap();
        let mut rx = store.subscribe();

        store.add_to_cart(&test_product("a", 1000)).await;

        // the mutation neither panicked nor lost the update
        assert_eq!(store.items().await.len(), 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    /// Storage whose reads always fail.
    struct ReadFailStorage;

    #[async_trait]
    impl Storage for ReadFailStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::ReadFailed("backend gone".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_open_fails_fast_when_storage_unreadable() {
        let result = CartStore::open(Arc::new(ReadFailStorage)).await;
        assert!(matches!(result, Err(StoreError::Storage(_))));
    }
}
