//! # Storage Capability
//!
//! The narrow key-value contract the cart persists through. Anything that
//! can get, set and remove a string under a key can back a cart.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  trait Storage                                             │
//! │  ├── get(key)        -> Option<String>                     │
//! │  ├── set(key, value)                                       │
//! │  ├── remove(key)                                           │
//! │  └── clear()                                               │
//! │                                                            │
//! │  impls: MemoryStorage, FileStorage, Box<S>, Arc<S>         │
//! └────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{StoreError, StoreResult};

/// Key-value storage for cart snapshots.
///
/// Methods take `&self`; backends use interior mutability so a single store
/// can be shared between a repository and whoever inspects it.
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Deletes every key this store owns.
    fn clear(&self) -> StoreResult<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }
}

/// Validates a storage key.
///
/// ## Rules
/// - Must not be empty
/// - Only letters, digits, hyphens and underscores
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-written, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.lock().remove(key);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_get_set_remove() {
        let store = MemoryStorage::new();
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.set("cart", "[1]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[1]"));

        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);

        // Removing again is fine
        store.remove("cart").unwrap();
    }

    #[test]
    fn test_memory_clear() {
        let store = MemoryStorage::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.len(), 2);

        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("cart").is_ok());
        assert!(validate_key("cart_v2-backup").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("cart.json").is_err());
    }

    #[test]
    fn test_shared_through_arc() {
        let store = Arc::new(MemoryStorage::new());
        let boxed: Box<dyn Storage> = Box::new(Arc::clone(&store));

        boxed.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }
}
