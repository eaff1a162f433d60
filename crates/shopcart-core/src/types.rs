//! # Domain Types
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐    add_item     ┌─────────────────┐               │
//! │  │    Product      │ ──────────────► │    LineItem     │               │
//! │  │  ─────────────  │   (snapshot)    │  ─────────────  │               │
//! │  │  id             │                 │  id             │               │
//! │  │  name           │                 │  name           │               │
//! │  │  price          │                 │  price (frozen) │               │
//! │  │  image          │                 │  image          │               │
//! │  │  description    │                 │  quantity ≥ 1   │               │
//! │  └─────────────────┘                 └─────────────────┘               │
//! │     from catalog                        owned by CartState             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product offered by the catalog.
///
/// Immutable from the cart's point of view; the cart only ever copies fields
/// out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price in the smallest currency unit.
    pub price: Money,

    /// Opaque image reference (URL or asset path).
    pub image: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Creates a product with an empty description.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            description: String::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product's entry in the cart.
///
/// ## Price Freezing
/// `name`, `price` and `image` are copied from the product when it is first
/// added. Later catalog changes never reach an existing line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Id of the product this line was created from.
    pub id: String,

    /// Product name at time of adding.
    pub name: String,

    /// Unit price at time of adding.
    pub price: Money,

    /// Image reference at time of adding.
    #[serde(default)]
    pub image: String,

    /// Quantity in cart (always ≥ 1 inside a CartState).
    #[ts(type = "number")]
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item from a product with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        LineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}
