//! # kiosk-data: Catalog Data Source for the Kiosk
//!
//! Reads product and promotion records from plain comma-separated files and
//! hands the checkout engine a ready [`kiosk_core::Catalog`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kiosk Data Flow                                  │
//! │                                                                         │
//! │  apps/kiosk startup (KIOSK_DATA_DIR)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kiosk-data (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  DataConfig   │    │   records     │    │   Catalog    │  │   │
//! │  │   │  (source.rs)  │───►│ parse_products│───►│ from_records │  │   │
//! │  │   │  dir + names  │    │ parse_promos  │    │ + warnings   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kiosk_core::Kiosk                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`source`] - File locations and catalog loading
//! - [`records`] - Header-driven record parsing
//! - [`error`] - Loading error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kiosk_data::{load_catalog, DataConfig};
//!
//! let catalog = load_catalog(&DataConfig::new("data"))?;
//! println!("{} products", catalog.len());
//! # Ok::<(), kiosk_data::DataError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod records;
pub mod source;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DataError, DataResult};
pub use records::{parse_products, parse_promotions};
pub use source::{build_catalog, load_catalog, load_records, DataConfig};
