//! # Shipping Policy
//!
//! Flat-fee shipping with a free-shipping threshold.
//!
//! ```text
//! subtotal ──► subtotal >= threshold ? ──yes──► fee 0
//!                                     └──no───► fee (flat)
//! ```
//!
//! The comparison is inclusive: a subtotal exactly equal to the threshold
//! ships free.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_SHIPPING_FEE};

/// Shipping rules applied to a cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShippingPolicy {
    /// Subtotal at or above which shipping is waived.
    pub free_shipping_threshold: Money,

    /// Fee charged when the subtotal is below the threshold.
    pub shipping_fee: Money,
}

impl ShippingPolicy {
    /// Creates a policy from a threshold and a flat fee.
    pub const fn new(free_shipping_threshold: Money, shipping_fee: Money) -> Self {
        ShippingPolicy {
            free_shipping_threshold,
            shipping_fee,
        }
    }

    /// Returns the fee owed for the given subtotal.
    #[inline]
    pub fn fee_for(&self, subtotal: Money) -> Money {
        if self.qualifies_for_free_shipping(subtotal) {
            Money::zero()
        } else {
            self.shipping_fee
        }
    }

    /// True when the subtotal reaches the free-shipping threshold.
    #[inline]
    pub fn qualifies_for_free_shipping(&self, subtotal: Money) -> bool {
        subtotal >= self.free_shipping_threshold
    }

    /// How much more must be spent to ship free (zero once qualified).
    pub fn remaining_for_free_shipping(&self, subtotal: Money) -> Money {
        if self.qualifies_for_free_shipping(subtotal) {
            Money::zero()
        } else {
            self.free_shipping_threshold - subtotal
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        ShippingPolicy::new(
            Money::from_cents(DEFAULT_FREE_SHIPPING_THRESHOLD),
            Money::from_cents(DEFAULT_SHIPPING_FEE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.fee_for(Money::from_cents(5000)), Money::zero());
        assert_eq!(policy.fee_for(Money::from_cents(4999)), Money::from_cents(100));
    }

    #[test]
    fn test_empty_subtotal_pays_fee() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.fee_for(Money::zero()), Money::from_cents(100));
    }

    #[test]
    fn test_custom_policy() {
        let policy = ShippingPolicy::new(Money::from_cents(10_000), Money::from_cents(350));
        assert_eq!(policy.fee_for(Money::from_cents(9_999)).cents(), 350);
        assert!(policy.fee_for(Money::from_cents(10_000)).is_zero());
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.remaining_for_free_shipping(Money::from_cents(2000)).cents(), 3000);
        assert!(policy.remaining_for_free_shipping(Money::from_cents(7000)).is_zero());
    }
}
