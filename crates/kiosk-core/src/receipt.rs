//! # Purchase Result
//!
//! The receipt-shaped accumulator threaded through one checkout.
//!
//! ## Amount Due
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total_price            Σ line.price            (gross)                 │
//! │  − total_discount       Σ allocation.discount   (free units)            │
//! │  − membership_discount  policy(non_promotion_total)                     │
//! │  ─────────────────────────────────────────────────                      │
//! │  = amount_due                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::allocation::Allocation;
use crate::money::Money;

/// One purchased line as shown on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    /// Gross price.
    pub price: Money,
    /// True if an in-date promotion governed the line.
    pub has_promotion: bool,
}

/// Free units granted for one product across the checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftItem {
    pub name: String,
    pub quantity: u32,
}

/// Totals for one checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurchaseResult {
    pub items: Vec<LineItem>,
    pub total_price: Money,
    pub total_discount: Money,
    /// Keyed by product name, in first-granted order.
    pub gift_items: Vec<GiftItem>,
    /// Membership discount base.
    pub non_promotion_total: Money,
    pub membership_discount: Money,
    /// Lines the buyer cancelled at a shortfall confirmation.
    pub cancelled: Vec<String>,
}

impl PurchaseResult {
    pub fn new() -> Self {
        PurchaseResult::default()
    }

    /// Folds one allocated line into the totals.
    pub fn record(&mut self, allocation: &Allocation) {
        self.items.push(LineItem {
            name: allocation.name.clone(),
            quantity: allocation.quantity,
            price: allocation.price,
            has_promotion: allocation.promotion_applied,
        });

        self.total_price += allocation.price;
        self.total_discount += allocation.discount;

        if !allocation.promotion_applied {
            self.non_promotion_total += allocation.price;
        }

        if allocation.gift_quantity > 0 {
            match self.gift_items.iter_mut().find(|g| g.name == allocation.name) {
                Some(gift) => gift.quantity += allocation.gift_quantity,
                None => self.gift_items.push(GiftItem {
                    name: allocation.name.clone(),
                    quantity: allocation.gift_quantity,
                }),
            }
        }
    }

    /// Marks a line as cancelled by the buyer.
    pub fn record_cancelled(&mut self, name: impl Into<String>) {
        self.cancelled.push(name.into());
    }

    /// What the buyer pays.
    pub fn amount_due(&self) -> Money {
        self.total_price - self.total_discount - self.membership_discount
    }

    /// Units across all purchased lines, free units included.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Free units granted for `name`.
    pub fn gift_quantity(&self, name: &str) -> u32 {
        self.gift_items
            .iter()
            .find(|g| g.name == name)
            .map_or(0, |g| g.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocation(name: &str, quantity: u32, price: i64, discount: i64, gift: u32) -> Allocation {
        Allocation {
            name: name.to_string(),
            quantity,
            promotional_units: if gift > 0 { quantity } else { 0 },
            regular_units: if gift > 0 { 0 } else { quantity },
            price: Money::from_won(price),
            discount: Money::from_won(discount),
            gift_quantity: gift,
            promotion_applied: gift > 0,
        }
    }

    #[test]
    fn test_record_accumulates() {
        let mut result = PurchaseResult::new();
        result.record(&allocation("Cola", 6, 6_000, 2_000, 2));
        result.record(&allocation("Water", 2, 1_000, 0, 0));

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total_price.won(), 7_000);
        assert_eq!(result.total_discount.won(), 2_000);
        assert_eq!(result.non_promotion_total.won(), 1_000);
        assert_eq!(result.total_quantity(), 8);
        assert!(result.items[0].has_promotion);
        assert!(!result.items[1].has_promotion);
    }

    #[test]
    fn test_gifts_sum_per_name() {
        let mut result = PurchaseResult::new();
        result.record(&allocation("Cola", 3, 3_000, 1_000, 1));
        result.record(&allocation("Chips", 2, 3_000, 1_500, 1));
        result.record(&allocation("Cola", 3, 3_000, 1_000, 1));

        assert_eq!(result.gift_items.len(), 2);
        assert_eq!(result.gift_quantity("Cola"), 2);
        assert_eq!(result.gift_quantity("Chips"), 1);
        assert_eq!(result.gift_quantity("Water"), 0);
        assert_eq!(result.gift_items[0].name, "Cola");
    }

    #[test]
    fn test_amount_due_identity() {
        let mut result = PurchaseResult::new();
        result.record(&allocation("Cola", 6, 6_000, 2_000, 2));
        result.record(&allocation("Water", 2, 1_000, 0, 0));
        result.membership_discount = Money::from_won(300);

        let gross: Money = result.items.iter().map(|i| i.price).sum();
        assert_eq!(
            result.amount_due(),
            gross - result.total_discount - result.membership_discount
        );
        assert_eq!(result.amount_due().won(), 4_700);
    }

    #[test]
    fn test_serializes_for_display() {
        let mut result = PurchaseResult::new();
        result.record(&allocation("Water", 1, 500, 0, 0));
        result.record_cancelled("Cola");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_price"], 500);
        assert_eq!(json["items"][0]["has_promotion"], false);
        assert_eq!(json["cancelled"][0], "Cola");
    }
}
