//! # Cart Repository
//!
//! Bridges a [`Storage`] backend and `CartState` snapshots.
//!
//! ## Hydration Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load()                                                                 │
//! │                                                                         │
//! │  storage.get(key)                                                      │
//! │     ├── Ok(None)        ──────────────────────────► empty cart          │
//! │     ├── Ok(Some(json))                                                  │
//! │     │     ├── from_snapshot ok ───────────────────► hydrated cart       │
//! │     │     └── corrupt / invalid ── warn! ─────────► empty cart          │
//! │     └── Err(e)          ── warn! ─────────────────► empty cart          │
//! │                                                                         │
//! │  A broken snapshot never blocks startup.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopcart_core::CartState;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::storage::Storage;

/// Key the cart snapshot is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Loads and saves the cart under a fixed key.
#[derive(Debug)]
pub struct CartRepository<S> {
    storage: S,
    key: String,
}

impl<S: Storage> CartRepository<S> {
    /// Creates a repository using [`DEFAULT_CART_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Creates a repository storing under a custom key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        CartRepository {
            storage,
            key: key.into(),
        }
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Hydrates the persisted cart, falling back to an empty one.
    pub fn load(&self) -> CartState {
        let snapshot = match self.storage.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                debug!(key = %self.key, "No persisted cart, starting empty");
                return CartState::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read persisted cart, starting empty");
                return CartState::new();
            }
        };

        match CartState::from_snapshot(&snapshot) {
            Ok(cart) => {
                debug!(key = %self.key, items = cart.item_count(), "Cart hydrated");
                cart
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding unusable cart snapshot");
                CartState::new()
            }
        }
    }

    /// Writes the cart snapshot.
    pub fn save(&self, cart: &CartState) -> StoreResult<()> {
        let json = cart.to_snapshot()?;
        self.storage.set(&self.key, &json)?;
        debug!(key = %self.key, items = cart.item_count(), "Cart persisted");
        Ok(())
    }

    /// Deletes the persisted snapshot.
    pub fn reset(&self) -> StoreResult<()> {
        self.storage.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileStorage;
    use crate::storage::MemoryStorage;
    use shopcart_core::{Money, Product};
    use std::sync::Arc;

    fn sample_cart() -> CartState {
        let chair = Product::new("1", "Chair", Money::from_cents(36900), "chair.jpg");
        let tray = Product::new("2", "Tray", Money::from_cents(7490), "tray.jpg");
        CartState::new()
            .add_item(&chair)
            .and_then(|c| c.add_item(&tray))
            .and_then(|c| c.add_item(&chair))
            .unwrap()
    }

    #[test]
    fn test_load_without_snapshot_is_empty() {
        let repo = CartRepository::new(MemoryStorage::new());
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let repo = CartRepository::new(MemoryStorage::new());
        let cart = sample_cart();

        repo.save(&cart).unwrap();
        assert_eq!(repo.load(), cart);
    }

    #[test]
    fn test_snapshot_is_verbatim_line_item_array() {
        let storage = Arc::new(MemoryStorage::new());
        let repo = CartRepository::new(Arc::clone(&storage));
        repo.save(&sample_cart()).unwrap();

        let raw = storage.get(DEFAULT_CART_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "1");
        assert_eq!(records[0]["quantity"], 2);
        assert_eq!(records[1]["price"], 7490);
    }

    #[test]
    fn test_corrupt_snapshot_hydrates_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(DEFAULT_CART_KEY, "{not json").unwrap();

        let repo = CartRepository::new(Arc::clone(&storage));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_invalid_snapshot_hydrates_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                DEFAULT_CART_KEY,
                r#"[{"id":"1","name":"Chair","price":100,"image":"","quantity":-2}]"#,
            )
            .unwrap();

        let repo = CartRepository::new(Arc::clone(&storage));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_empty_and_null_snapshots_hydrate_empty() {
        let storage = Arc::new(MemoryStorage::new());
        let repo = CartRepository::new(Arc::clone(&storage));

        let empty_id = r#"[{"id":"","name":"Chair","price":1,"image":"","quantity":1}]"#;
        for snapshot in ["", "null", empty_id] {
            storage.set(DEFAULT_CART_KEY, snapshot).unwrap();
            assert!(repo.load().is_empty(), "snapshot {:?}", snapshot);
        }
    }

    #[test]
    fn test_whitespace_id_and_name_survive_load() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                DEFAULT_CART_KEY,
                r#"[{"id":" ","name":" ","price":100,"image":"","quantity":1}]"#,
            )
            .unwrap();

        let cart = CartRepository::new(Arc::clone(&storage)).load();
        assert_eq!(cart.item_count(), 1);
        assert!(cart.get(" ").is_some());
    }

    #[test]
    fn test_max_quantity_snapshot_loads_with_saturated_totals() {
        let storage = Arc::new(MemoryStorage::new());
        let max = i64::MAX;
        storage
            .set(
                DEFAULT_CART_KEY,
                &format!(
                    r#"[{{"id":"1","name":"Chair","price":36900,"image":"","quantity":{max}}},
                        {{"id":"2","name":"Tray","price":7490,"image":"","quantity":{max}}}]"#
                ),
            )
            .unwrap();

        let cart = CartRepository::new(Arc::clone(&storage)).load();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_count(), i64::MAX);
        assert_eq!(cart.subtotal(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_custom_key_and_reset() {
        let storage = Arc::new(MemoryStorage::new());
        let repo = CartRepository::with_key(Arc::clone(&storage), "cart_v2");
        repo.save(&sample_cart()).unwrap();

        assert!(storage.get("cart_v2").unwrap().is_some());
        assert!(storage.get(DEFAULT_CART_KEY).unwrap().is_none());

        repo.reset().unwrap();
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_file_backed_repository() {
        let dir = tempfile::tempdir().unwrap();
        let cart = sample_cart();

        CartRepository::new(FileStorage::open(dir.path()).unwrap())
            .save(&cart)
            .unwrap();

        let reopened = CartRepository::new(FileStorage::open(dir.path()).unwrap());
        assert_eq!(reopened.load(), cart);
    }
}
