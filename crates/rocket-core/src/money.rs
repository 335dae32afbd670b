//! # Money Module
//!
//! Provides `Price`, the unit price exactly as the catalog sent it, and
//! `Money`, the integer-cent value used for line totals and subtotals.
//!
//! ## Prices Verbatim, Totals in Cents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Inventory API / snapshot         In memory                             │
//! │  ─────────────────────────        ─────────                             │
//! │  "price": 99.999         ──────►  Price(99.999)  (copied, never edited) │
//! │                                        │                                │
//! │                                        ▼  × amount, rounded to cents    │
//! │                                   Money(20000)                          │
//! │                                        │                                │
//! │                                        ▼  Σ lines (exact)               │
//! │  "subtotal": 200.0       ◄──────  Money                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The storefront keeps product records in local storage as it received
//! them, so `Price` re-serializes to the same JSON number. Only derived
//! values go through `Money`.
//!
//! ## Usage
//! ```rust
//! use rocket_core::money::{Money, Price};
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line_total = price * 2;          // $21.98
//! assert_eq!(line_total.cents(), 2198);
//!
//! let unit: Price = serde_json::from_str("10.99").unwrap();
//! assert_eq!(unit.to_money(), price);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

const CENT_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use rocket_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount that is a whole number
    /// of cents.
    ///
    /// Returns `None` for sub-cent, non-finite or out-of-range input.
    ///
    /// ## Example
    /// ```rust
    /// use rocket_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(179.9), Some(Money::from_cents(17990)));
    /// assert_eq!(Money::from_decimal(99.999), None);
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(value: f64) -> Option<Self> {
        let scaled = value * 100.0;
        let cents = scaled.round();
        if !cents.is_finite() || cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        // tolerate binary noise such as 179.9 * 100 = 17990.000000000004
        if (scaled - cents).abs() > CENT_TOLERANCE * cents.abs().max(1.0) {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Rounds a decimal amount to the nearest cent, saturating at the `i64`
    /// range.
    pub fn from_decimal_rounded(value: f64) -> Self {
        Money((value * 100.0).round() as i64)
    }

    /// Returns the decimal form used on the wire.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a line amount, saturating instead of
    /// overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use rocket_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal(value)
            .ok_or_else(|| serde::de::Error::custom(format!("not a whole number of cents: {value}")))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display; front ends format with their own locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Price Type
// =============================================================================

/// A unit price exactly as the inventory endpoint served it.
///
/// Serializes back to the same JSON number, so product metadata stays a
/// verbatim copy of the catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Number);

impl Price {
    /// Creates a price from a decimal value. `None` for non-finite input.
    pub fn from_decimal(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Price)
    }

    /// Returns the price as a float.
    pub fn as_f64(&self) -> f64 {
        // always `Some` without serde_json's arbitrary_precision
        self.0.as_f64().unwrap_or_default()
    }

    /// Unit price rounded to the nearest cent.
    pub fn to_money(&self) -> Money {
        Money::from_decimal_rounded(self.as_f64())
    }

    /// Price of `amount` units, rounded once to the nearest cent.
    pub fn times(&self, amount: i64) -> Money {
        Money::from_decimal_rounded(self.as_f64() * amount as f64)
    }
}

impl From<i64> for Price {
    fn from(whole: i64) -> Self {
        Price(Number::from(whole))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_requires_whole_cents() {
        assert_eq!(Money::from_decimal(139.9).unwrap().cents(), 13990);
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
        assert!(Money::from_decimal(99.999).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
        assert!(Money::from_decimal(1e300).is_none());

        assert_eq!(Money::from_decimal_rounded(99.999).cents(), 10000);
        assert_eq!(Money::from_decimal_rounded(1e300).cents(), i64::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_json_wire_format() {
        let price: Money = serde_json::from_str("179.9").unwrap();
        assert_eq!(price.cents(), 17990);
        assert_eq!(serde_json::to_string(&price).unwrap(), "179.9");

        let whole: Money = serde_json::from_str("200").unwrap();
        assert_eq!(whole.cents(), 20000);

        assert!(serde_json::from_str::<Money>("\"12.00\"").is_err());
        assert!(serde_json::from_str::<Money>("12.345").is_err());
    }

    #[test]
    fn test_price_is_kept_verbatim() {
        for wire in ["99.999", "179.9", "200", "0.5"] {
            let price: Price = serde_json::from_str(wire).unwrap();
            assert_eq!(serde_json::to_string(&price).unwrap(), wire);
            assert_eq!(price.to_string(), wire);
        }
    }

    #[test]
    fn test_price_to_money() {
        let price: Price = serde_json::from_str("99.999").unwrap();
        assert_eq!(price.to_money().cents(), 10000);
        // rounded once per line, not per unit
        assert_eq!(price.times(3).cents(), 30000);

        let price = Price::from_decimal(179.9).unwrap();
        assert_eq!(price.times(2).cents(), 35980);
        assert_eq!(Price::from(200).to_money().cents(), 20000);
        assert!(Price::from_decimal(f64::NAN).is_none());
    }
}
