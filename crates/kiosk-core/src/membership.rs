//! # Membership Discount
//!
//! Flat-rate discount on the non-promotional subtotal, capped per checkout.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::{MEMBERSHIP_DISCOUNT_CAP, MEMBERSHIP_RATE_BPS};

/// Membership discount policy.
///
/// Applies once per checkout to the aggregate non-promotional total, never
/// to individual lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipDiscount {
    /// Rate in basis points (3000 = 30%).
    pub rate_bps: u32,
    pub cap: Money,
}

impl Default for MembershipDiscount {
    fn default() -> Self {
        MembershipDiscount {
            rate_bps: MEMBERSHIP_RATE_BPS,
            cap: Money::from_won(MEMBERSHIP_DISCOUNT_CAP),
        }
    }
}

impl MembershipDiscount {
    pub fn new(rate_bps: u32, cap: Money) -> Self {
        MembershipDiscount { rate_bps, cap }
    }

    /// `min(floor(non_promotion_total × rate), cap)`, never negative.
    pub fn discount(&self, non_promotion_total: Money) -> Money {
        non_promotion_total
            .percentage_floor(self.rate_bps)
            .min(self.cap)
            .max(Money::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_percent_floored() {
        let membership = MembershipDiscount::default();
        assert_eq!(membership.discount(Money::from_won(1_000)).won(), 300);
        assert_eq!(membership.discount(Money::from_won(3_333)).won(), 999);
        assert_eq!(membership.discount(Money::zero()).won(), 0);
    }

    #[test]
    fn test_cap() {
        let membership = MembershipDiscount::default();
        assert_eq!(membership.discount(Money::from_won(26_666)).won(), 7_999);
        assert_eq!(membership.discount(Money::from_won(26_667)).won(), 8_000);
        assert_eq!(membership.discount(Money::from_won(1_000_000)).won(), 8_000);
    }

    #[test]
    fn test_bounds_hold_for_any_total() {
        let membership = MembershipDiscount::default();
        for won in (0..60_000).step_by(7) {
            let total = Money::from_won(won);
            let discount = membership.discount(total);
            assert!(discount.won() <= 8_000);
            assert!(discount.won() <= won * 3 / 10);
        }
    }

    #[test]
    fn test_custom_policy() {
        let membership = MembershipDiscount::new(1_000, Money::from_won(500));
        assert_eq!(membership.discount(Money::from_won(4_000)).won(), 400);
        assert_eq!(membership.discount(Money::from_won(9_000)).won(), 500);
    }
}
