//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Prices on this kiosk are whole won. There is no minor unit.            │
//! │                                                                         │
//! │    Cola 1,000 × 3          = 3,000                                      │
//! │    Membership 30% of 3,500 = 1,050   (floor, never rounded up)          │
//! │                                                                         │
//! │  Every amount is an i64 count of won. Percentages are basis points.     │
//! │  No floating point anywhere in the money path.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::money::Money;
//!
//! let price = Money::from_won(1_000);
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.won(), 3_000);
//!
//! // 30% of 3,500, floored
//! assert_eq!(Money::from_won(3_500).percentage_floor(3_000).won(), 1_050);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole won.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences such as `amount_due` stay representable
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized transparently**: receipts carry plain integers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole won.
    #[inline]
    pub const fn from_won(won: i64) -> Self {
        Money(won)
    }

    /// Returns the value in won.
    #[inline]
    pub const fn won(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// let unit_price = Money::from_won(1_200);
    /// assert_eq!(unit_price.multiply_quantity(5).won(), 6_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Returns `floor(self × bps / 10000)`.
    ///
    /// Discounts always round down.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// // 30% of 1,001 = 300.3 → 300
    /// assert_eq!(Money::from_won(1_001).percentage_floor(3_000).won(), 300);
    /// ```
    pub fn percentage_floor(&self, bps: u32) -> Money {
        // i128 keeps large subtotals from overflowing before the division
        let won = (self.0 as i128 * bps as i128).div_euclid(10_000);
        Money(won as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain integer output, for logs and debugging.
///
/// The console formats amounts with thousands separators itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a unit count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
