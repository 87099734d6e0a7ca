//! # Catalog
//!
//! Owns every product line and promotion for the session.
//!
//! ## Index Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Index                                    │
//! │                                                                         │
//! │   name ──────────► CatalogEntry                                        │
//! │                    ┌──────────────────────┬──────────────────────┐     │
//! │   "Cola"           │ promotional: Some(…) │ regular: Some(…)     │     │
//! │   "Water"          │ promotional: None    │ regular: Some(…)     │     │
//! │   "Sparkling"      │ promotional: Some(…) │ regular: None        │     │
//! │                    └──────────────────────┴──────────────────────┘     │
//! │                                                                         │
//! │   promotion name ──► Promotion                                         │
//! │                                                                         │
//! │   Load order of names is kept for display.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation
//! [`Catalog::deduct`] is the only operation that changes stock. Everything
//! else is a read.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promotion::Promotion;
use crate::types::{Product, ProductRecord, PromotionRecord, StockPool};

// =============================================================================
// Catalog Entry
// =============================================================================

/// The (at most) two lines sharing one product name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub promotional: Option<Product>,
    pub regular: Option<Product>,
}

impl CatalogEntry {
    /// Returns the line for `pool`, if present.
    pub fn line(&self, pool: StockPool) -> Option<&Product> {
        match pool {
            StockPool::Promotional => self.promotional.as_ref(),
            StockPool::Regular => self.regular.as_ref(),
        }
    }

    fn line_mut(&mut self, pool: StockPool) -> Option<&mut Product> {
        match pool {
            StockPool::Promotional => self.promotional.as_mut(),
            StockPool::Regular => self.regular.as_mut(),
        }
    }

    /// Stock remaining in `pool` (zero if the line does not exist).
    pub fn stock(&self, pool: StockPool) -> u32 {
        self.line(pool).map_or(0, |p| p.quantity)
    }

    /// Combined promotional and regular stock, saturating at `u32::MAX`.
    pub fn total_stock(&self) -> u32 {
        self.stock(StockPool::Promotional)
            .saturating_add(self.stock(StockPool::Regular))
    }

    /// Promotional line if it exists at all, otherwise the regular line.
    pub fn pricing_line(&self) -> Option<&Product> {
        self.promotional.as_ref().or(self.regular.as_ref())
    }
}

/// A product whose promotional and regular lines carry different prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceDivergence {
    pub name: String,
    pub promotional_price: Money,
    pub regular_price: Money,
}

// =============================================================================
// Catalog
// =============================================================================

/// Product lines indexed by name, plus the promotions they reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    order: Vec<String>,
    entries: HashMap<String, CatalogEntry>,
    promotions: HashMap<String, Promotion>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Builds a catalog from data-source records, in record order.
    ///
    /// ## Errors
    /// - `InvalidPromotion` for zero buy/get, reversed dates or a repeated
    ///   promotion name
    /// - `DuplicateLine` when two records describe the same pool of a name
    ///
    /// Product records that reference an unknown promotion are kept as
    /// promotional lines; they simply never have an active promotion.
    pub fn from_records<P, R>(products: P, promotions: R) -> CoreResult<Self>
    where
        P: IntoIterator<Item = ProductRecord>,
        R: IntoIterator<Item = PromotionRecord>,
    {
        let mut catalog = Catalog::new();

        for record in promotions {
            catalog.add_promotion(Promotion::try_from(record)?)?;
        }

        for record in products {
            catalog.add_product(Product::from(record))?;
        }

        Ok(catalog)
    }

    /// Registers a promotion by name.
    pub fn add_promotion(&mut self, promotion: Promotion) -> CoreResult<()> {
        if self.promotions.contains_key(&promotion.name) {
            return Err(CoreError::InvalidPromotion {
                name: promotion.name,
                reason: "defined more than once".to_string(),
            });
        }

        self.promotions.insert(promotion.name.clone(), promotion);
        Ok(())
    }

    /// Adds a product line, keeping at most one line per pool and name.
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        let pool = product.pool();

        if !self.entries.contains_key(&product.name) {
            self.order.push(product.name.clone());
        }

        let entry = self.entries.entry(product.name.clone()).or_default();
        let slot = match pool {
            StockPool::Promotional => &mut entry.promotional,
            StockPool::Regular => &mut entry.regular,
        };

        if slot.is_some() {
            return Err(CoreError::DuplicateLine {
                name: product.name,
                pool,
            });
        }

        *slot = Some(product);
        Ok(())
    }

    /// Number of distinct product names.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if any line exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Both lines for `name`.
    pub fn entry(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    pub fn find_regular_line(&self, name: &str) -> Option<&Product> {
        self.entry(name).and_then(|e| e.regular.as_ref())
    }

    pub fn find_promotional_line(&self, name: &str) -> Option<&Product> {
        self.entry(name).and_then(|e| e.promotional.as_ref())
    }

    /// Resolves the line pricing decisions start from.
    ///
    /// The promotional line wins whenever it exists, even if it is out of
    /// stock or its promotion is out of date.
    pub fn find_for_pricing(&self, name: &str) -> Option<&Product> {
        self.entry(name).and_then(CatalogEntry::pricing_line)
    }

    /// Looks up a promotion by its own name.
    pub fn promotion(&self, promotion_name: &str) -> Option<&Promotion> {
        self.promotions.get(promotion_name)
    }

    /// All promotions, in no particular order.
    pub fn promotions(&self) -> impl Iterator<Item = &Promotion> {
        self.promotions.values()
    }

    /// The promotion attached to `name`'s promotional line, if it is valid
    /// on `today`.
    pub fn active_promotion(&self, name: &str, today: NaiveDate) -> Option<&Promotion> {
        self.find_promotional_line(name)
            .and_then(|line| line.promotion.as_deref())
            .and_then(|promotion_name| self.promotion(promotion_name))
            .filter(|promotion| promotion.is_valid(today))
    }

    /// Combined promotional and regular stock for `name`.
    pub fn total_stock(&self, name: &str) -> u32 {
        self.entry(name).map_or(0, CatalogEntry::total_stock)
    }

    /// Removes `quantity` units from one pool of `name`.
    ///
    /// This is the sole stock mutator. Deducting zero units always succeeds.
    ///
    /// ## Errors
    /// - `ProductNotFound` if no line exists for `name`
    /// - `InsufficientStock` if the pool is missing or holds fewer units
    pub fn deduct(&mut self, name: &str, quantity: u32, pool: StockPool) -> CoreResult<()> {
        if quantity == 0 {
            return Ok(());
        }

        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;

        match entry.line_mut(pool) {
            Some(line) if line.can_supply(quantity) => {
                line.quantity -= quantity;
                Ok(())
            }
            Some(line) => Err(CoreError::insufficient_stock(
                name,
                pool,
                line.quantity,
                quantity,
            )),
            None => Err(CoreError::insufficient_stock(name, pool, 0, quantity)),
        }
    }

    /// Every line for display, in load order.
    ///
    /// A promotional line without a regular counterpart is followed by a
    /// synthesized zero-stock regular line at the same price, so both kinds
    /// are always listed side by side.
    pub fn all_products(&self) -> Vec<Product> {
        let mut lines = Vec::with_capacity(self.order.len() * 2);

        for entry in self.order.iter().filter_map(|name| self.entries.get(name)) {
            match (&entry.promotional, &entry.regular) {
                (Some(promotional), Some(regular)) => {
                    lines.push(promotional.clone());
                    lines.push(regular.clone());
                }
                (Some(promotional), None) => {
                    lines.push(promotional.clone());
                    lines.push(Product::regular(
                        promotional.name.clone(),
                        promotional.price,
                        0,
                    ));
                }
                (None, Some(regular)) => lines.push(regular.clone()),
                (None, None) => {}
            }
        }

        lines
    }

    /// Products whose two lines disagree on price.
    pub fn price_divergences(&self) -> Vec<PriceDivergence> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name))
            .filter_map(|entry| match (&entry.promotional, &entry.regular) {
                (Some(p), Some(r)) if p.price != r.price => Some(PriceDivergence {
                    name: p.name.clone(),
                    promotional_price: p.price,
                    regular_price: r.price,
                }),
                _ => None,
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
