//! # Promotion Rules
//!
//! Buy-N-get-M promotions and the pure arithmetic around them.
//!
//! ## Sets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Soda 2+1"   buy = 2, get = 1, set size = 3                            │
//! │                                                                         │
//! │  quantity 7:  [■ ■ □] [■ ■ □] [■]                                        │
//! │                └ set ┘ └ set ┘  remainder                               │
//! │                                                                         │
//! │  complete_sets(7) = 2     remainder(7) = 1                              │
//! │  gift_quantity(7) = 2     discount(1,000, 7) = 2 × 1 × 1,000 = 2,000    │
//! │                                                                         │
//! │  ■ paid unit   □ free unit                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these functions read live stock. Callers decide which quantity is
//! promotion-eligible and pass it in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::PromotionRecord;

/// A buy-N-get-M promotion with an inclusive validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub name: String,
    /// Units the customer pays for in each set.
    pub buy: u32,
    /// Bonus units in each set.
    pub get: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Promotion {
    /// Builds a promotion, rejecting zero `buy`/`get`, a set size past
    /// `u32::MAX` and reversed dates.
    pub fn new(
        name: impl Into<String>,
        buy: u32,
        get: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> CoreResult<Self> {
        let name = name.into();

        if buy == 0 || get == 0 {
            return Err(CoreError::InvalidPromotion {
                name,
                reason: "buy and get must both be at least 1".to_string(),
            });
        }

        if buy.checked_add(get).is_none() {
            return Err(CoreError::InvalidPromotion {
                name,
                reason: format!("a set of {buy}+{get} units is too large"),
            });
        }

        if start_date > end_date {
            return Err(CoreError::InvalidPromotion {
                name,
                reason: format!("starts {start_date} after it ends {end_date}"),
            });
        }

        Ok(Promotion {
            name,
            buy,
            get,
            start_date,
            end_date,
        })
    }

    /// Returns true if `today` falls inside `[start_date, end_date]`.
    #[inline]
    pub fn is_valid(&self, today: NaiveDate) -> bool {
        self.start_date <= today && today <= self.end_date
    }

    /// Units in one complete set (`buy + get`).
    #[inline]
    pub fn set_size(&self) -> u32 {
        self.buy + self.get
    }

    #[inline]
    pub fn complete_sets(&self, quantity: u32) -> u32 {
        quantity / self.set_size()
    }

    #[inline]
    pub fn remainder(&self, quantity: u32) -> u32 {
        quantity % self.set_size()
    }

    /// Value of the free units in `quantity`: `complete_sets × get × price`.
    pub fn discount(&self, price: Money, quantity: u32) -> Money {
        price.multiply_quantity(self.gift_quantity(quantity))
    }

    /// Free units contained in `quantity`.
    #[inline]
    pub fn gift_quantity(&self, quantity: u32) -> u32 {
        self.complete_sets(quantity) * self.get
    }

    /// Units of promotional stock that count toward the promotion.
    ///
    /// Stock is consumed in whole multiples of `buy`:
    /// `floor(stock / buy) × buy`.
    #[inline]
    pub fn max_eligible_units(&self, promotional_stock: u32) -> u32 {
        (promotional_stock / self.buy) * self.buy
    }

    /// Returns true if `quantity` pays for a full set but stops short of
    /// taking its free units (`buy ≤ quantity < set_size`).
    #[inline]
    pub fn is_short_of_free_units(&self, quantity: u32) -> bool {
        quantity >= self.buy && quantity < self.set_size()
    }
}

impl TryFrom<PromotionRecord> for Promotion {
    type Error = CoreError;

    fn try_from(record: PromotionRecord) -> CoreResult<Self> {
        Promotion::new(
            record.name,
            record.buy,
            record.get,
            record.start_date,
            record.end_date,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn promotion(buy: u32, get: u32) -> Promotion {
        Promotion::new("test", buy, get, date(2024, 1, 1), date(2024, 12, 31)).unwrap()
    }

    #[test]
    fn test_validity_window_is_inclusive() {
        let p = promotion(2, 1);
        assert!(p.is_valid(date(2024, 1, 1)));
        assert!(p.is_valid(date(2024, 6, 15)));
        assert!(p.is_valid(date(2024, 12, 31)));
        assert!(!p.is_valid(date(2023, 12, 31)));
        assert!(!p.is_valid(date(2025, 1, 1)));
    }

    #[test]
    fn test_set_arithmetic() {
        let p = promotion(2, 1);
        assert_eq!(p.set_size(), 3);
        assert_eq!(p.complete_sets(7), 2);
        assert_eq!(p.remainder(7), 1);
        assert_eq!(p.gift_quantity(7), 2);
        assert_eq!(p.discount(Money::from_won(1_000), 7).won(), 2_000);
        assert_eq!(p.discount(Money::from_won(1_000), 2).won(), 0);
    }

    #[test]
    fn test_sets_times_size_plus_remainder_is_quantity() {
        for buy in 1..=4 {
            for get in 1..=3 {
                let p = promotion(buy, get);
                for quantity in 0..=40 {
                    assert_eq!(
                        p.complete_sets(quantity) * p.set_size() + p.remainder(quantity),
                        quantity,
                        "buy={buy} get={get} quantity={quantity}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_discount_is_multiple_of_get_times_price() {
        let price = Money::from_won(1_200);
        for buy in 1..=3 {
            for get in 1..=3 {
                let p = promotion(buy, get);
                let unit = price.multiply_quantity(get).won();
                for quantity in 0..=30 {
                    let discount = p.discount(price, quantity).won();
                    assert!(discount >= 0);
                    assert_eq!(discount % unit, 0);
                }
            }
        }
    }

    #[test]
    fn test_max_eligible_units_uses_buy_granularity() {
        let p = promotion(2, 1);
        assert_eq!(p.max_eligible_units(2), 2);
        assert_eq!(p.max_eligible_units(3), 2);
        assert_eq!(p.max_eligible_units(7), 6);
        assert_eq!(p.max_eligible_units(1), 0);
    }

    #[test]
    fn test_short_of_free_units() {
        let two_plus_one = promotion(2, 1);
        assert!(!two_plus_one.is_short_of_free_units(1));
        assert!(two_plus_one.is_short_of_free_units(2));
        assert!(!two_plus_one.is_short_of_free_units(3));

        let one_plus_one = promotion(1, 1);
        assert!(one_plus_one.is_short_of_free_units(1));
        assert!(!one_plus_one.is_short_of_free_units(2));
    }

    #[test]
    fn test_rejects_invalid_records() {
        let zero_get = Promotion::new("bad", 2, 0, date(2024, 1, 1), date(2024, 2, 1));
        assert!(matches!(zero_get, Err(CoreError::InvalidPromotion { .. })));

        let oversized = PromotionRecord {
            name: "oversized".to_string(),
            buy: u32::MAX,
            get: 1,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
        };
        assert!(matches!(
            Promotion::try_from(oversized),
            Err(CoreError::InvalidPromotion { .. })
        ));

        let reversed = PromotionRecord {
            name: "reversed".to_string(),
            buy: 1,
            get: 1,
            start_date: date(2024, 3, 1),
            end_date: date(2024, 2, 1),
        };
        assert!(Promotion::try_from(reversed).is_err());
    }
}
