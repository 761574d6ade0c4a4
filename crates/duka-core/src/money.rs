//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! All monetary values in the system are integer minor units (cents).
//! The database, calculations, and reports all use cents; only display
//! code converts to shillings.
//!
//! ```rust
//! use duka_core::money::Money;
//!
//! let price = Money::from_cents(45000); // KSh 450.00
//! let total = price.multiply_quantity(10);
//! assert_eq!(total.cents(), 450_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Signed so that refunds, margins on mispriced stock, and net-profit
/// arithmetic stay representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (shillings) portion.
    #[inline]
    pub const fn shillings(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use duka_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(450);
    /// assert_eq!(unit_price.multiply_quantity(10).cents(), 4500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display. UI layers own proper localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}KSh {}.{:02}",
            sign,
            self.shillings().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money yields the ledger total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(45099);
        assert_eq!(money.cents(), 45099);
        assert_eq!(money.shillings(), 450);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(45000)), "KSh 450.00");
        assert_eq!(format!("{}", Money::from_cents(150)), "KSh 1.50");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-KSh 5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "KSh 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(450);

        assert_eq!((a + b).cents(), 1450);
        assert_eq!((a - b).cents(), 550);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1450);
        c -= b;
        assert_eq!(c.cents(), 1000);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(450);
        assert_eq!(unit_price.multiply_quantity(10).cents(), 4500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300]
            .iter()
            .map(|c| Money::from_cents(*c))
            .sum();
        assert_eq!(total.cents(), 600);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let margin = Money::from_cents(200) - Money::from_cents(450);
        assert!(margin.is_negative());
        assert_eq!(margin.abs().cents(), 250);
    }
}
