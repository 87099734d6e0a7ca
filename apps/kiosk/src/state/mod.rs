//! # State Module
//!
//! Application state for the kiosk console.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐  │
//! │  │   KioskConfig            │        │   kiosk_core::Kiosk          │  │
//! │  │                          │        │                              │  │
//! │  │  data_dir, today         │ ─────► │  Catalog (live stock)        │  │
//! │  │  store_name              │        │  business date               │  │
//! │  │  receipt_format          │        │  MembershipDiscount          │  │
//! │  │  membership policy       │        │                              │  │
//! │  └──────────────────────────┘        └──────────────────────────────┘  │
//! │                                                                         │
//! │  Config is read-only after startup. The Kiosk is owned by the          │
//! │  shopping loop; there is exactly one buyer at a time.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{format_amount, KioskConfig, ReceiptFormat};
