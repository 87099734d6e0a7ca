//! # kiosk-core: Checkout Engine for the Kiosk
//!
//! Stock allocation, promotion eligibility and pricing for a single-register
//! kiosk. Everything here is pure: the crate reads no files, prints nothing
//! and asks the buyer through an injected port.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kiosk Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/kiosk (console)                         │   │
//! │  │    catalog listing ──► purchase input ──► Y/N ──► receipt       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ConfirmationPort                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kiosk-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  validation ──► eligibility ──► allocation ──► receipt          │   │
//! │  │                     │               │              │            │   │
//! │  │                 promotion        catalog       membership       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO LOGGING • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │                    kiosk-data (records loader)                  │   │
//! │  │              products.md / promotions.md → Catalog              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product lines, purchase lines, data-source records
//! - [`money`] - Whole-won Money type
//! - [`catalog`] - Name-indexed promotional/regular lines and stock deduction
//! - [`promotion`] - Buy-N-get-M set arithmetic
//! - [`eligibility`] - Top-up and shortfall decisions
//! - [`allocation`] - Pool split, deduction and line pricing
//! - [`membership`] - Capped membership discount
//! - [`receipt`] - Per-checkout totals
//! - [`validation`] - Purchase request and Y/N parsing
//! - [`checkout`] - Checkout state machine and confirmation port
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kiosk_core::{Catalog, Kiosk, Prompt, ProductRecord, Step};
//!
//! let catalog = Catalog::from_records(
//!     vec![ProductRecord { name: "Water".into(), price: 500, quantity: 10, promotion: None }],
//!     Vec::new(),
//! )
//! .unwrap();
//! let mut kiosk = Kiosk::new(catalog, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//!
//! let lines = kiosk.parse_request("[Water-2]").unwrap();
//! let mut session = kiosk.begin_checkout(lines);
//!
//! assert_eq!(session.advance().unwrap(), Step::Prompt(Prompt::Membership));
//! let Step::Completed(result) = session.answer(true).unwrap() else { unreachable!() };
//!
//! // 1,000 minus 30% membership discount
//! assert_eq!(result.amount_due().won(), 700);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod catalog;
pub mod checkout;
pub mod eligibility;
pub mod error;
pub mod kiosk;
pub mod membership;
pub mod money;
pub mod promotion;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, CatalogEntry, PriceDivergence};
pub use checkout::{run_checkout, CheckoutSession, ConfirmationPort, Prompt, SessionState, Step};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use kiosk::Kiosk;
pub use membership::MembershipDiscount;
pub use money::Money;
pub use promotion::Promotion;
pub use receipt::{GiftItem, LineItem, PurchaseResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default membership discount rate in basis points (30%).
pub const MEMBERSHIP_RATE_BPS: u32 = 3_000;

/// Default ceiling on the membership discount per checkout, in won.
pub const MEMBERSHIP_DISCOUNT_CAP: i64 = 8_000;
