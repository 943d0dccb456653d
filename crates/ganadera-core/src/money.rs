//! # Money Module
//!
//! Provides the `Money` type for unit prices and transaction totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    3 × 10.10 = 30.299999999999997  ❌ WRONG!                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3 × 1010 cents = 3030 cents = 30.30  ✅                              │
//! │                                                                         │
//! │  The remote store keeps `numeric` columns, so on the wire Money is a    │
//! │  plain JSON number (31.5). Inside Rust it never leaves integer cents.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ganadera_core::money::Money;
//!
//! let unit_price = Money::parse("10.50").unwrap();
//! let total = unit_price.multiply_quantity(3).unwrap();
//! assert_eq!(total.cents(), 3150);
//! assert_eq!(total.to_string(), "$31.50");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// TransactionForm.unit_price ("10.50")
///        │ Money::parse
///        ▼
/// unit_price × quantity ──► NewTransaction.total ──► registros.total
///                                                    (stored, never recomputed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use ganadera_core::money::Money;
    ///
    /// let price = Money::from_cents(1050); // Represents 10.50
    /// assert_eq!(price.cents(), 1050);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount as received from the remote store,
    /// rounding to the nearest cent.
    ///
    /// ## Example
    /// ```rust
    /// use ganadera_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(31.5).cents(), 3150);
    /// assert_eq!(Money::from_decimal(10.99).cents(), 1099);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Parses user input such as `"10.50"`, `"10.5"`, `"10"` or `"0.99"`.
    ///
    /// ## Rules
    /// - Must not be empty
    /// - Must not be negative (mirrors the form's `min="0"`)
    /// - At most two decimal places (mirrors the form's `step="0.01"`)
    ///
    /// ## Example
    /// ```rust
    /// use ganadera_core::money::Money;
    ///
    /// assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
    /// assert!(Money::parse("-1").is_err());
    /// assert!(Money::parse("1.005").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "unit price".to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(ValidationError::Required {
                field: "unit price".to_string(),
            });
        }
        if input.starts_with('-') {
            return Err(ValidationError::OutOfRange {
                field: "unit price".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        let (major, minor) = match input.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (input, ""),
        };

        if minor.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }
        if major.is_empty() && minor.is_empty() {
            return Err(invalid("not a number"));
        }
        if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("not a number"));
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid("amount too large"))?
        };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("not a number"))? * 10,
            _ => minor.parse().map_err(|_| invalid("not a number"))?,
        };

        major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .map(Money)
            .ok_or_else(|| invalid("amount too large"))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount as a decimal number for the wire.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a quantity. `None` if the product does
    /// not fit in i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use ganadera_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1050);
    /// assert_eq!(unit_price.multiply_quantity(3), Some(Money::from_cents(3150)));
    /// assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style display (`$31.50`). Views use `DisplayConfig` for the symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor())
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Wire Format
// =============================================================================
// `numeric` columns come back as JSON numbers. Some proxies stringify them,
// so strings are accepted on the way in as well.

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Ok(Money::from_decimal(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.trim()
            .parse::<f64>()
            .map(Money::from_decimal)
            .map_err(|_| E::custom(format!("invalid amount: {v}")))
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(3150).to_string(), "$31.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
    }

    #[test]
    fn test_parse_accepts_form_input() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse(" 0 ").unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Money::parse(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Money::parse("-3"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse(".").is_err());
    }

    #[test]
    fn test_quantity_times_price() {
        let price = Money::parse("10.50").unwrap();
        assert_eq!(price.multiply_quantity(3), Some(Money::from_cents(3150)));
        assert_eq!(Money::zero().multiply_quantity(7), Some(Money::zero()));
    }

    #[test]
    fn test_quantity_times_price_overflow() {
        let price = Money::parse("100000000000000").unwrap();
        assert_eq!(price.multiply_quantity(999_999), None);
        assert_eq!(Money::from_cents(1000).multiply_quantity(i64::MAX), None);
    }

    #[test]
    fn test_float_trap_avoided() {
        // 3 × 10.10 in binary floating point is 30.299999999999997
        let price = Money::parse("10.10").unwrap();
        assert_eq!(price.multiply_quantity(3).unwrap().cents(), 3030);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(100), Money::from_cents(250)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 350);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Money::from_cents(3150)).unwrap();
        assert_eq!(json, "31.5");

        let parsed: Money = serde_json::from_str("31.5").unwrap();
        assert_eq!(parsed.cents(), 3150);

        let parsed: Money = serde_json::from_str("12").unwrap();
        assert_eq!(parsed.cents(), 1200);

        let parsed: Money = serde_json::from_str("\"10.99\"").unwrap();
        assert_eq!(parsed.cents(), 1099);

        let parsed: Option<Money> = serde_json::from_str("null").unwrap();
        assert!(parsed.is_none());
    }
}
