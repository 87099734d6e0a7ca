//! # Error Types
//!
//! Domain-specific error types for kiosk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kiosk-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog, stock and checkout failures           │
//! │  └── ValidationError  - Purchase request / Y-N syntax failures         │
//! │                                                                         │
//! │  kiosk-data errors (separate crate)                                    │
//! │  └── DataError        - Catalog file loading failures                  │
//! │                                                                         │
//! │  kiosk app errors                                                      │
//! │  └── AppError         - What the console prints                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DataError / AppError → Console    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recovery Rules
//! No error kind is fatal to the process. [`CoreError::is_recoverable`]
//! tells the caller whether the same input should simply be asked again
//! (syntax failures) or whether the current checkout was abandoned.

use serde::Serialize;
use thiserror::Error;

use crate::types::StockPool;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No catalog line exists for the requested name.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A stock pool is missing or holds fewer units than requested.
    ///
    /// ## When This Occurs
    /// ```text
    /// Request [Cola-5], shortfall accepted
    ///      │
    ///      ▼
    /// Promotional pool: 2 units ──► deduct 2  ✓
    /// Regular pool:     1 unit  ──► deduct 3  ✗
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Cola", pool: Regular, available: 1, requested: 3 }
    /// ```
    #[error("Insufficient {pool} stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        pool: StockPool,
        available: u32,
        requested: u32,
    },

    /// A request asks for more units than both pools of a product hold.
    #[error("Requested {requested} {name}, only {available} in stock")]
    ExceedsStock {
        name: String,
        available: u32,
        requested: u32,
    },

    /// The buyer declined to pay regular price for the part of a line that
    /// promotional stock cannot cover.
    #[error("Purchase of {name} was cancelled")]
    PurchaseCancelled { name: String },

    /// Two catalog records describe the same pool of the same product.
    #[error("Duplicate {pool} line for {name}")]
    DuplicateLine { name: String, pool: StockPool },

    /// A promotion record violates its invariants (zero buy/get, reversed dates).
    #[error("Invalid promotion {name}: {reason}")]
    InvalidPromotion { name: String, reason: String },

    /// An answer was submitted while the checkout was not waiting for one.
    #[error("Checkout is not waiting for an answer")]
    NoPendingPrompt,

    /// The checkout already completed or was aborted.
    #[error("Checkout session is closed")]
    SessionClosed,

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InsufficientStock error.
    pub fn insufficient_stock(
        name: impl Into<String>,
        pool: StockPool,
        available: u32,
        requested: u32,
    ) -> Self {
        CoreError::InsufficientStock {
            name: name.into(),
            pool,
            available,
            requested,
        }
    }

    /// Maps the error onto the flat list of error kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ProductNotFound(_) => ErrorKind::ProductNotFound,
            CoreError::InsufficientStock { .. } | CoreError::ExceedsStock { .. } => {
                ErrorKind::InsufficientStock
            }
            CoreError::PurchaseCancelled { .. } => ErrorKind::PurchaseCancelled,
            CoreError::DuplicateLine { .. } | CoreError::InvalidPromotion { .. } => {
                ErrorKind::InvalidCatalog
            }
            CoreError::NoPendingPrompt | CoreError::SessionClosed => ErrorKind::SessionState,
            CoreError::Validation(e) => e.kind(),
        }
    }

    /// Returns true if the caller should ask for the same input again.
    ///
    /// Syntax failures never touched any state, so re-prompting is always
    /// safe. Everything else ends the current line or checkout.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input syntax errors.
///
/// Raised by [`crate::validation`] before any business rule runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing (or only whitespace) was entered.
    #[error("No input was entered")]
    EmptyInput,

    /// Brackets or the name/quantity separator are malformed.
    #[error("Invalid format, enter purchases as [name-quantity]")]
    InvalidFormat,

    /// A bracket group has no product name.
    #[error("Product name is missing")]
    EmptyName,

    /// A bracket group has no quantity.
    #[error("Quantity is missing")]
    EmptyQuantity,

    /// The quantity is not a number.
    #[error("Quantity must be a whole number: {0}")]
    NotInteger(String),

    /// The quantity has a fractional part.
    #[error("Quantity must not have a decimal part: {0}")]
    DecimalQuantity(String),

    /// The quantity is zero or negative.
    #[error("Quantity must be at least 1")]
    NegativeQuantity,

    /// A confirmation answer other than Y or N.
    #[error("Answer with Y or N")]
    InvalidYesNo,
}

impl ValidationError {
    /// Maps the error onto the flat list of error kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::EmptyInput => ErrorKind::EmptyInput,
            ValidationError::InvalidFormat => ErrorKind::InvalidFormat,
            ValidationError::EmptyName => ErrorKind::EmptyName,
            ValidationError::EmptyQuantity => ErrorKind::EmptyQuantity,
            ValidationError::NotInteger(_) => ErrorKind::NotInteger,
            ValidationError::DecimalQuantity(_) => ErrorKind::DecimalQuantity,
            ValidationError::NegativeQuantity => ErrorKind::NegativeQuantity,
            ValidationError::InvalidYesNo => ErrorKind::InvalidYesNo,
        }
    }
}

// =============================================================================
// Error Kind
// =============================================================================

/// Flat classification of every failure the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    EmptyInput,
    InvalidFormat,
    EmptyName,
    EmptyQuantity,
    NotInteger,
    DecimalQuantity,
    NegativeQuantity,
    ProductNotFound,
    InsufficientStock,
    InvalidYesNo,
    PurchaseCancelled,
    InvalidCatalog,
    SessionState,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
