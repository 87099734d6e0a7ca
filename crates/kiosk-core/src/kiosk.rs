//! # Kiosk
//!
//! Owns the live catalog for a run and hands out checkout sessions.

use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::checkout::CheckoutSession;
use crate::error::CoreResult;
use crate::membership::MembershipDiscount;
use crate::types::{Product, PurchaseLine};
use crate::validation;

/// The catalog, the business date and the membership policy of one kiosk.
#[derive(Debug, Clone)]
pub struct Kiosk {
    catalog: Catalog,
    today: NaiveDate,
    membership: MembershipDiscount,
}

impl Kiosk {
    pub fn new(catalog: Catalog, today: NaiveDate) -> Self {
        Kiosk {
            catalog,
            today,
            membership: MembershipDiscount::default(),
        }
    }

    /// Replaces the default 30% / 8,000 membership policy.
    pub fn with_membership(mut self, membership: MembershipDiscount) -> Self {
        self.membership = membership;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Date promotions are checked against.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn membership(&self) -> MembershipDiscount {
        self.membership
    }

    /// Every line for display, with synthesized empty regular lines.
    pub fn catalog_snapshot(&self) -> Vec<Product> {
        self.catalog.all_products()
    }

    /// Parses raw buyer input against current stock.
    pub fn parse_request(&self, input: &str) -> CoreResult<Vec<PurchaseLine>> {
        validation::parse_purchase_request(input, &self.catalog)
    }

    /// Starts a checkout. Stock changes land only if the session completes.
    pub fn begin_checkout(&mut self, lines: Vec<PurchaseLine>) -> CheckoutSession<'_> {
        CheckoutSession::new(&mut self.catalog, lines, self.today, self.membership)
    }
}
