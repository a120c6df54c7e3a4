//! # Money
//!
//! Prices and totals as integer cents.
//!
//! ```text
//! Product.price (cents) × quantity ──► line total ──► Σ ──► CheckoutSummary.total_price
//!
//! 69999 × 8 = 559992  →  "5599.92"   (no float rounding anywhere)
//! ```
//!
//! Arithmetic on totals is checked: a cart large enough to overflow `i64`
//! cents is rejected instead of wrapping.
//!
//! ```rust
//! use bazaar_core::money::Money;
//!
//! let price = Money::from_cents(69999);
//! let line_total = price.checked_multiply_quantity(8).unwrap();
//! assert_eq!(line_total.to_decimal_string(), "5599.92");
//! assert_eq!(line_total.to_string(), "$5599.92");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// A monetary value in cents. Serializes as a bare integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The 0-99 cents remainder, sign dropped.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Line total for `qty` units, `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Plain decimal rendering for JSON, e.g. `"5599.92"`.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

/// `$5599.92`, `-$5.50`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal_string().strip_prefix('-') {
            Some(magnitude) => write!(f, "-${}", magnitude),
            None => write!(f, "${}", self.to_decimal_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let money = Money::from_cents(69999);
        assert_eq!(money.dollars(), 699);
        assert_eq!(money.cents_part(), 99);

        let negative = Money::from_cents(-550);
        assert_eq!(negative.dollars(), -5);
        assert_eq!(negative.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(559992).to_string(), "$5599.92");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(120000).to_decimal_string(), "1200.00");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_cents(69999);
        assert_eq!(price.checked_multiply_quantity(8), Some(Money::from_cents(559992)));
        assert_eq!(price.checked_multiply_quantity(i64::MAX), None);

        assert_eq!(
            Money::from_cents(1).checked_add(Money::from_cents(2)),
            Some(Money::from_cents(3))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    /// Summing cents never drifts the way repeated float addition does.
    #[test]
    fn test_repeated_addition_is_exact() {
        let float_total: f64 = std::iter::repeat(0.1_f64).take(10).sum();
        assert_ne!(float_total, 1.0);

        let total = std::iter::repeat(Money::from_cents(10))
            .take(10)
            .try_fold(Money::zero(), Money::checked_add);
        assert_eq!(total, Some(Money::from_cents(100)));
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(19950)).unwrap();
        assert_eq!(json, "19950");
    }
}
