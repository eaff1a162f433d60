//! # shopcart-store: Persistence Layer for shopcart
//!
//! Key-value storage for cart snapshots, plus the repository that turns a
//! stored string into a `CartState` and back.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        shopcart Data Flow                               │
//! │                                                                         │
//! │  CartController (after every transition)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 shopcart-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │ CartRepository │──►│ Storage trait  │◄──│ MemoryStorage │  │   │
//! │  │   │ load / save    │   │ get/set/remove │   │ FileStorage   │  │   │
//! │  │   └────────────────┘   └────────────────┘   └───────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/shopcart/cart.store.json  (FileStorage, Linux)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use shopcart_core::{CartState, Money, Product};
//! use shopcart_store::{CartRepository, MemoryStorage};
//!
//! let repo = CartRepository::new(MemoryStorage::new());
//! assert!(repo.load().is_empty());
//!
//! let lamp = Product::new("1", "Lamp", Money::from_cents(2000), "lamp.png");
//! let cart = CartState::new().add_item(&lamp).unwrap();
//! repo.save(&cart).unwrap();
//!
//! assert_eq!(repo.load(), cart);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file::FileStorage;
pub use repository::{CartRepository, DEFAULT_CART_KEY};
pub use storage::{MemoryStorage, Storage};
