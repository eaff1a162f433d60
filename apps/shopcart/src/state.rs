//! # Shared Cart
//!
//! A `CartState` handle for hosts that touch the cart from more than one
//! thread.
//!
//! The terminal session owns its cart through [`CartController`] on a single
//! thread and does not use this module. `SharedCart` is the entry point for
//! embedding the engine elsewhere: hydrate with
//! [`CartRepository::load`](shopcart_store::CartRepository::load), hand
//! clones to worker threads, and persist [`SharedCart::snapshot`] when done.
//!
//! [`CartController`]: crate::controller::CartController
//!
//! ## Transition Under Lock
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  thread A: transition(|c| c.add_item(&lamp))                            │
//! │  thread B: transition(|c| Ok(c.remove_item("2")))                       │
//! │                                                                         │
//! │   lock ──► read current ──► compute next ──► swap ──► unlock            │
//! │                                                                         │
//! │  The read and the swap happen under one lock, so no update is lost.   │
//! │  A failed transition leaves the current state in place.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use shopcart_core::{CartState, CoreResult};

/// Cloneable, thread-safe handle to a single cart.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    cart: Arc<Mutex<CartState>>,
}

impl SharedCart {
    /// Wraps an existing cart.
    pub fn new(cart: CartState) -> Self {
        SharedCart {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use shopcart::state::SharedCart;
    ///
    /// let shared = SharedCart::default();
    /// assert!(shared.with_cart(|cart| cart.is_empty()));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartState) -> R,
    {
        f(&self.lock())
    }

    /// Applies a transition atomically and returns the new state.
    pub fn transition<F>(&self, f: F) -> CoreResult<CartState>
    where
        F: FnOnce(&CartState) -> CoreResult<CartState>,
    {
        let mut cart = self.lock();
        let next = f(&cart)?;
        *cart = next.clone();
        Ok(next)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> CartState {
        self.lock().clone()
    }

    // A panic inside a transition never leaves a half-written cart behind,
    // so a poisoned lock still guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.cart.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcart_core::{CoreError, Money, Product, ValidationError};
    use shopcart_store::{CartRepository, MemoryStorage};
    use std::sync::Arc;
    use std::thread;

    fn lamp() -> Product {
        Product::new("1", "Lamp", Money::from_cents(2000), "lamp.png")
    }

    #[test]
    fn test_transition_replaces_state() {
        let shared = SharedCart::default();
        let next = shared.transition(|c| c.add_item(&lamp())).unwrap();

        assert_eq!(next.total_count(), 1);
        assert_eq!(shared.snapshot(), next);
    }

    #[test]
    fn test_failed_transition_keeps_state() {
        let shared = SharedCart::default();
        shared.transition(|c| c.add_item(&lamp())).unwrap();

        let result = shared.transition(|_| {
            Err(CoreError::Validation(ValidationError::required("id")))
        });
        assert!(result.is_err());
        assert_eq!(shared.with_cart(|c| c.total_count()), 1);
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let shared = SharedCart::default();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        shared.transition(|c| c.add_item(&lamp())).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let cart = shared.snapshot();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_count(), 200);
        assert_eq!(cart.subtotal(), Money::from_cents(400_000));
    }

    #[test]
    fn test_hydrate_share_and_persist() {
        let storage = Arc::new(MemoryStorage::new());
        let repo = CartRepository::new(Arc::clone(&storage));
        repo.save(&CartState::new().add_item(&lamp()).unwrap()).unwrap();

        let shared = SharedCart::new(repo.load());
        let worker = {
            let shared = shared.clone();
            thread::spawn(move || {
                shared.transition(|c| Ok(c.set_quantity("1", 5))).unwrap();
            })
        };
        worker.join().unwrap();

        repo.save(&shared.snapshot()).unwrap();
        let reloaded = CartRepository::new(storage).load();
        assert_eq!(reloaded.get("1").unwrap().quantity, 5);
        assert_eq!(reloaded, shared.snapshot());
    }
}
