//! # Domain Types
//!
//! Core domain types used throughout the kiosk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductRecord   │   │ PromotionRecord │   │  PurchaseLine   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  name           │   │  name           │       │
//! │  │  price          │   │  buy / get      │   │  quantity ≥ 1   │       │
//! │  │  quantity       │   │  start / end    │   └─────────────────┘       │
//! │  │  promotion?     │   └────────┬────────┘                              │
//! │  └────────┬────────┘            │                                       │
//! │           ▼                     ▼                                       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Promotion     │   │   StockPool     │       │
//! │  │  (one line of   │   │  (promotion.rs) │   │  Promotional    │       │
//! │  │   the catalog)  │   │                 │   │  Regular        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Lines per Name
//! A product name is not unique on its own. "Cola" may exist once with a
//! promotion attached (the promotional line) and once without (the regular
//! line). Each line has its own stock pool.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Stock Pool
// =============================================================================

/// Which of a product's two stock pools an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPool {
    /// Stock attached to a promotion.
    Promotional,
    /// Stock sold at standard price.
    Regular,
}

impl fmt::Display for StockPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockPool::Promotional => write!(f, "promotional"),
            StockPool::Regular => write!(f, "regular"),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// One catalog line: a product name with its own price and stock pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name. Shared by the promotional and regular line.
    pub name: String,

    /// Unit price in won.
    pub price: Money,

    /// Units left in this line's pool.
    pub quantity: u32,

    /// Name of the attached promotion, if this is a promotional line.
    pub promotion: Option<String>,
}

impl Product {
    /// Creates a regular (promotion-free) line.
    pub fn regular(name: impl Into<String>, price: Money, quantity: u32) -> Self {
        Product {
            name: name.into(),
            price,
            quantity,
            promotion: None,
        }
    }

    /// Creates a promotional line.
    pub fn promotional(
        name: impl Into<String>,
        price: Money,
        quantity: u32,
        promotion: impl Into<String>,
    ) -> Self {
        Product {
            name: name.into(),
            price,
            quantity,
            promotion: Some(promotion.into()),
        }
    }

    /// Returns true if a promotion is attached, whether or not it is in date.
    #[inline]
    pub fn has_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Returns the pool this line belongs to.
    #[inline]
    pub fn pool(&self) -> StockPool {
        if self.has_promotion() {
            StockPool::Promotional
        } else {
            StockPool::Regular
        }
    }

    /// Checks if the pool can supply `quantity` units.
    #[inline]
    pub fn can_supply(&self, quantity: u32) -> bool {
        self.quantity >= quantity
    }

    /// Returns true when the pool is empty.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}

// =============================================================================
// Purchase Line
// =============================================================================

/// One parsed `[name-quantity]` group of a purchase request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub name: String,
    pub quantity: u32,
}

impl PurchaseLine {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        PurchaseLine {
            name: name.into(),
            quantity,
        }
    }
}

// =============================================================================
// External Records
// =============================================================================

/// A product record as supplied by the catalog data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: i64,
    pub quantity: u32,
    /// `None` for a regular line.
    pub promotion: Option<String>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            name: record.name,
            price: Money::from_won(record.price),
            quantity: record.quantity,
            promotion: record.promotion,
        }
    }
}

/// A promotion record as supplied by the catalog data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionRecord {
    pub name: String,
    pub buy: u32,
    pub get: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// =============================================================================
// Unit Tests
// =============================================================================
