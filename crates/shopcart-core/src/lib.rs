//! # shopcart-core: Cart State Engine
//!
//! Pure, deterministic cart logic. Every operation takes a state value and
//! returns a new one; nothing here touches storage, the clock or a screen.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        shopcart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 CartController (apps/shopcart)                  │   │
//! │  │   Renderer ◄── Notifier ◄── Confirm ◄── Catalog                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add / remove / set / clear            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ shopcart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CartState │  │   rules   │  │   │
//! │  │   │ LineItem  │  │ Shipping  │  │ CartTotals│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO TIMERS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ JSON snapshot                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shopcart-store (persistence)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and LineItem
//! - [`money`] - Integer money in the smallest currency unit
//! - [`shipping`] - Free-shipping threshold and flat fee
//! - [`cart`] - CartState transitions, totals, snapshots
//! - [`validation`] - Product / line item checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopcart_core::{CartState, Money, Product, ShippingPolicy};
//!
//! let product = Product::new("1", "Desk Lamp", Money::from_cents(2000), "lamp.png");
//! let policy = ShippingPolicy::default();
//!
//! let cart = CartState::new().add_item(&product).unwrap();
//! assert_eq!(cart.subtotal().cents(), 2000);
//! assert_eq!(cart.shipping_fee(&policy).cents(), 100);
//!
//! let cart = cart.set_quantity("1", 3);
//! assert_eq!(cart.grand_total(&policy).cents(), 6000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod shipping;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartState, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use shipping::ShippingPolicy;
pub use types::{LineItem, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Subtotal at or above which shipping is free, in the smallest currency unit.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: i64 = 5000;

/// Flat shipping fee charged below the threshold.
pub const DEFAULT_SHIPPING_FEE: i64 = 100;
