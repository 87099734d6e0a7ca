//! # Allocation Engine
//!
//! Commits the stock deductions for one resolved line and prices it.
//!
//! ## Pool Priority
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EligibleLine { Cola, 5 }     promo stock 7 (2+1)   regular stock 10    │
//! │                                                                         │
//! │  1. promotional units = min(floor(7 / 2) × 2, 5) = 5                   │
//! │  2. regular units     = 5 − 5                    = 0                   │
//! │  3. regular pool short? shift leftover promotional units onto it       │
//! │  4. deduct promotional, then regular  (all checks ran before step 4)   │
//! │                                                                         │
//! │  discount/gift from min(pre-deduction promo stock, quantity)           │
//! │    = min(7, 5) = 5 → 1 set → discount 1 × 1 × price, gift 1            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! When the promotion is out of date the promotional pool is still drawn
//! first, at full stock granularity, but nothing is discounted.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::eligibility::EligibleLine;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::StockPool;

/// Outcome of allocating one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub name: String,
    pub quantity: u32,
    /// Units taken from the promotional pool.
    pub promotional_units: u32,
    /// Units taken from the regular pool.
    pub regular_units: u32,
    /// Gross price of the line before any discount.
    pub price: Money,
    /// Value of the free units.
    pub discount: Money,
    pub gift_quantity: u32,
    /// Whether an in-date promotion governed this line.
    pub promotion_applied: bool,
}

impl Allocation {
    /// Returns true if `promotional_units + regular_units == quantity`.
    pub fn is_balanced(&self) -> bool {
        self.promotional_units + self.regular_units == self.quantity
    }
}

/// Deducts stock for `line` and returns the priced allocation.
///
/// Every stock check runs before the first deduction, so a failed call
/// leaves the catalog unchanged.
///
/// ## Errors
/// - `ProductNotFound` if the name has no catalog lines
/// - `InsufficientStock` if the pools together cannot cover the quantity
pub fn allocate(catalog: &mut Catalog, line: &EligibleLine, today: NaiveDate) -> CoreResult<Allocation> {
    let entry = catalog
        .entry(&line.name)
        .ok_or_else(|| CoreError::ProductNotFound(line.name.clone()))?;

    let quantity = line.quantity;
    let regular_stock = entry.stock(StockPool::Regular);
    let regular_price = entry.regular.as_ref().map(|p| p.price);

    // Regular-only product
    let Some(promotional) = entry.promotional.as_ref() else {
        let price = regular_price.unwrap_or_default();
        catalog.deduct(&line.name, quantity, StockPool::Regular)?;

        return Ok(Allocation {
            name: line.name.clone(),
            quantity,
            promotional_units: 0,
            regular_units: quantity,
            price: price * quantity,
            discount: Money::zero(),
            gift_quantity: 0,
            promotion_applied: false,
        });
    };

    let promotional_stock = promotional.quantity;
    let promotional_price = promotional.price;
    let promotion = catalog.active_promotion(&line.name, today).cloned();

    let mut promotional_units = match &promotion {
        Some(promotion) => promotion.max_eligible_units(promotional_stock).min(quantity),
        None => promotional_stock.min(quantity),
    };
    let mut regular_units = quantity - promotional_units;

    // Units past the buy granularity can still come from the promotional
    // pool when the regular pool runs dry.
    if regular_units > regular_stock {
        let spare = promotional_stock - promotional_units;
        let shift = (regular_units - regular_stock).min(spare);
        promotional_units += shift;
        regular_units -= shift;
    }

    if regular_units > regular_stock {
        return Err(CoreError::insufficient_stock(
            &line.name,
            StockPool::Regular,
            regular_stock,
            regular_units,
        ));
    }

    match catalog.deduct(&line.name, promotional_units, StockPool::Promotional) {
        Ok(()) => catalog.deduct(&line.name, regular_units, StockPool::Regular)?,
        // promotional_units never exceeds the stock read above, so this arm
        // only runs if the pool changed between that read and the deduction.
        Err(CoreError::InsufficientStock { .. }) => {
            catalog.deduct(&line.name, quantity, StockPool::Regular)?;
            promotional_units = 0;
            regular_units = quantity;
        }
        Err(other) => return Err(other),
    }

    let price = promotional_price * promotional_units
        + regular_price.unwrap_or(promotional_price) * regular_units;

    let (discount, gift_quantity) = match &promotion {
        Some(promotion) => {
            let eligible = promotional_stock.min(quantity);
            (
                promotion.discount(promotional_price, eligible),
                promotion.gift_quantity(eligible),
            )
        }
        None => (Money::zero(), 0),
    };

    Ok(Allocation {
        name: line.name.clone(),
        quantity,
        promotional_units,
        regular_units,
        price,
        discount,
        gift_quantity,
        promotion_applied: promotion.is_some(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
