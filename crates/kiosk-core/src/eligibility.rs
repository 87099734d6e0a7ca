//! # Eligibility Resolver
//!
//! Decides, for one purchase line and before any stock is touched, how much
//! of the requested quantity the promotion can cover and which buyer
//! confirmations are needed.
//!
//! ## Decision Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve(line)                                                          │
//! │      │                                                                  │
//! │      ├── no promotional line / promotion out of date                    │
//! │      │        └──► Proceed (whole line at regular price)                │
//! │      │                                                                  │
//! │      ├── buy ≤ qty < set size  and  promo stock ≥ set size              │
//! │      │        └──► OfferTopUp ── yes ──► Proceed (qty = set size)       │
//! │      │                        └─ no ──► shortfall check ▼               │
//! │      │                                                                  │
//! │      └── shortfall check: qty − floor(stock / buy) × buy > 0 ?          │
//! │               ├── no  ──► Proceed                                       │
//! │               └── yes ──► ConfirmShortfall ── yes ──► Proceed           │
//! │                                            └─ no ──► PurchaseCancelled  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolver only reads the catalog. Answers come back through
//! [`EligibilityResolver::after_top_up`] and
//! [`EligibilityResolver::after_shortfall`], which makes it usable both from
//! the synchronous port driver and from the explicit checkout state machine.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::promotion::Promotion;
use crate::types::PurchaseLine;

// =============================================================================
// Outcomes
// =============================================================================

/// A line whose confirmations are all resolved, ready for allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibleLine {
    pub name: String,
    /// Effective quantity (raised to a full set if a top-up was accepted).
    pub quantity: u32,
}

impl EligibleLine {
    fn unchanged(line: PurchaseLine) -> Self {
        EligibleLine {
            name: line.name,
            quantity: line.quantity,
        }
    }
}

/// "You can get N more for free" offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopUpOffer {
    pub line: PurchaseLine,
    /// Units that would be added at no charge.
    pub free_units: u32,
}

/// "N units will not get the promotion, buy anyway?" notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortfallNotice {
    pub line: PurchaseLine,
    pub non_promotion_quantity: u32,
}

/// What the resolver needs next for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed(EligibleLine),
    OfferTopUp(TopUpOffer),
    ConfirmShortfall(ShortfallNotice),
}

// =============================================================================
// Resolver
// =============================================================================

/// Promotion-eligibility rules evaluated against a catalog on a given day.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityResolver<'a> {
    catalog: &'a Catalog,
    today: NaiveDate,
}

impl<'a> EligibilityResolver<'a> {
    pub fn new(catalog: &'a Catalog, today: NaiveDate) -> Self {
        EligibilityResolver { catalog, today }
    }

    /// First decision for a freshly parsed line.
    ///
    /// ## Errors
    /// `ProductNotFound` if the catalog has no line for the name.
    pub fn resolve(&self, line: &PurchaseLine) -> CoreResult<Decision> {
        let Some((promotion, promotional_stock)) = self.promotion_context(&line.name)? else {
            return Ok(Decision::Proceed(EligibleLine::unchanged(line.clone())));
        };

        if promotion.is_short_of_free_units(line.quantity)
            && promotional_stock >= promotion.set_size()
        {
            return Ok(Decision::OfferTopUp(TopUpOffer {
                line: line.clone(),
                free_units: promotion.set_size() - line.quantity,
            }));
        }

        Ok(Self::check_shortfall(line.clone(), promotion, promotional_stock))
    }

    /// Continues after the buyer answered a top-up offer.
    ///
    /// Accepting raises the quantity to exactly one set. The offer was only
    /// made because promotional stock covers that set, so no shortfall check
    /// follows. Declining keeps the original quantity and runs the shortfall
    /// check on it.
    pub fn after_top_up(&self, offer: TopUpOffer, accepted: bool) -> CoreResult<Decision> {
        let Some((promotion, promotional_stock)) = self.promotion_context(&offer.line.name)?
        else {
            return Ok(Decision::Proceed(EligibleLine::unchanged(offer.line)));
        };

        if accepted {
            return Ok(Decision::Proceed(EligibleLine {
                name: offer.line.name,
                quantity: promotion.set_size(),
            }));
        }

        Ok(Self::check_shortfall(offer.line, promotion, promotional_stock))
    }

    /// Continues after the buyer answered a shortfall notice.
    ///
    /// ## Errors
    /// `PurchaseCancelled` when the buyer declines.
    pub fn after_shortfall(
        &self,
        notice: ShortfallNotice,
        accepted: bool,
    ) -> CoreResult<EligibleLine> {
        if !accepted {
            return Err(CoreError::PurchaseCancelled {
                name: notice.line.name,
            });
        }

        Ok(EligibleLine::unchanged(notice.line))
    }

    /// Active promotion and promotional stock for `name`, or `None` when the
    /// line is priced without a promotion.
    fn promotion_context(&self, name: &str) -> CoreResult<Option<(&'a Promotion, u32)>> {
        let entry = self
            .catalog
            .entry(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;

        let Some(promotional) = entry.promotional.as_ref() else {
            return Ok(None);
        };

        Ok(self
            .catalog
            .active_promotion(name, self.today)
            .map(|promotion| (promotion, promotional.quantity)))
    }

    fn check_shortfall(line: PurchaseLine, promotion: &Promotion, promotional_stock: u32) -> Decision {
        let eligible = promotion.max_eligible_units(promotional_stock);
        let non_promotion_quantity = line.quantity.saturating_sub(eligible);

        if non_promotion_quantity > 0 {
            Decision::ConfirmShortfall(ShortfallNotice {
                line,
                non_promotion_quantity,
            })
        } else {
            Decision::Proceed(EligibleLine::unchanged(line))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
