//! # Cart State Engine
//!
//! `CartState` is an ordered list of line items, unique by id. Every
//! transition borrows the current state and returns a new one; the caller
//! decides when to swap it in and when to persist it.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  Operation                 Existing id              Unknown id          │
//! │  ─────────                 ───────────              ──────────          │
//! │  add_item(product)         quantity + 1             append (qty 1)      │
//! │  remove_item(id)           drop line                no-op               │
//! │  set_quantity(id, n > 0)   quantity = n             no-op               │
//! │  set_quantity(id, n <= 0)  drop line                no-op               │
//! │  clear()                   ───────── empty cart ─────────               │
//! │                                                                         │
//! │  Position and price/name/image snapshots never change after the        │
//! │  first add. Totals are derived on demand, never stored.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//! The persisted form is the bare line item array:
//! ```json
//! [{"id":"1","name":"Chair","price":36900,"image":"chair.jpg","quantity":2}]
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::shipping::ShippingPolicy;
use crate::types::{LineItem, Product};
use crate::validation::{is_valid_line_items, validate_line_items, validate_product};

// =============================================================================
// Cart State
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product bumps its quantity)
/// - Every quantity is ≥ 1 (setting 0 or less removes the line)
/// - Insertion order is preserved across updates
///
/// The fields are private so the only way in is through a transition or a
/// validated snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartState { items: Vec::new() }
    }

    /// Builds a cart from already-parsed line items, validating them first.
    pub fn from_items(items: Vec<LineItem>) -> CoreResult<Self> {
        validate_line_items(&items)?;
        Ok(CartState { items })
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line item by product id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// True when the product id has a line in the cart.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1, snapshot and position kept
    /// - Product not in cart: appended with quantity 1 and the product's
    ///   current name, price and image
    ///
    /// ## Errors
    /// `CoreError::Validation` when the product has an empty id or name, or a
    /// price that is not positive. The state is left untouched.
    pub fn add_item(&self, product: &Product) -> CoreResult<Self> {
        validate_product(product)?;

        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => items.push(LineItem::from_product(product)),
        }
        Ok(CartState { items })
    }

    /// Removes the line with the given id. Unknown ids are a no-op.
    pub fn remove_item(&self, id: &str) -> Self {
        if !self.contains(id) {
            return self.clone();
        }

        let items = self
            .items
            .iter()
            .filter(|i| i.id != id)
            .cloned()
            .collect();
        CartState { items }
    }

    /// Replaces the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`CartState::remove_item`]
    /// - Known id: quantity replaced, everything else untouched
    /// - Unknown id: no-op
    pub fn set_quantity(&self, id: &str, quantity: i64) -> Self {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let mut items = self.items.clone();
        if let Some(item) = items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
        CartState { items }
    }

    /// Returns an empty cart.
    pub fn clear(&self) -> Self {
        CartState::new()
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// Sum of quantities across all lines, saturating at `i64::MAX`.
    pub fn total_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Σ price × quantity, before shipping.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Shipping owed under the given policy.
    pub fn shipping_fee(&self, policy: &ShippingPolicy) -> Money {
        policy.fee_for(self.subtotal())
    }

    /// Subtotal plus shipping.
    pub fn grand_total(&self, policy: &ShippingPolicy) -> Money {
        let subtotal = self.subtotal();
        subtotal + policy.fee_for(subtotal)
    }

    /// True iff every line has a non-empty id and name, a quantity ≥ 1, and
    /// no id appears twice.
    pub fn is_valid(&self) -> bool {
        is_valid_line_items(&self.items)
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Serializes the line items as a JSON array.
    pub fn to_snapshot(&self) -> CoreResult<String> {
        serde_json::to_string(&self.items).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Parses and validates a persisted snapshot.
    ///
    /// ## Errors
    /// - `CorruptSnapshot`: not a JSON array of line item records
    /// - `Validation`: records parse but break a cart invariant
    pub fn from_snapshot(json: &str) -> CoreResult<Self> {
        let items: Vec<LineItem> = serde_json::from_str(json)?;
        Self::from_items(items)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Totals summary computed from a cart and a shipping policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct line items.
    #[ts(type = "number")]
    pub item_count: usize,

    /// Sum of quantities (the badge number).
    #[ts(type = "number")]
    pub total_count: i64,

    pub subtotal: Money,
    pub shipping_fee: Money,
    pub grand_total: Money,

    /// Extra spend needed to reach free shipping (zero once reached).
    pub free_shipping_remaining: Money,
}

impl CartTotals {
    /// Computes every total in a single pass over the subtotal.
    pub fn compute(cart: &CartState, policy: &ShippingPolicy) -> Self {
        let subtotal = cart.subtotal();
        let shipping_fee = policy.fee_for(subtotal);
        CartTotals {
            item_count: cart.item_count(),
            total_count: cart.total_count(),
            subtotal,
            shipping_fee,
            grand_total: subtotal + shipping_fee,
            free_shipping_remaining: policy.remaining_for_free_shipping(subtotal),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
