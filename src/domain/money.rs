//! Money type
//!
//! Signed, exact, money-grade decimal used for every amount and balance in
//! the ledger. Backed by `rust_decimal`, so sums never drift the way binary
//! floating point does.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Largest expense or split amount accepted into a ledger (1 trillion units)
pub const MAX_ENTRY_MAGNITUDE: i64 = 1_000_000_000_000;

/// Maximum decimal places (cents)
pub const MONEY_SCALE: u32 = 2;

/// Money represents a signed currency value with at most two fractional digits.
///
/// # Invariants
/// - At most 2 decimal places
///
/// Recorded amounts are capped at [`MAX_ENTRY_MAGNITUDE`] by
/// [`Money::check_entry_bound`]. Balances and settlements are sums of those
/// amounts and may go past the cap, so `Money` itself (and its serde form)
/// does not enforce it.
///
/// Serialized as a decimal string (`"12.50"`) so no precision is lost at the
/// JSON boundary.
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use split_ledger::domain::Money;
///
/// let money = Money::new(Decimal::new(1250, 2)).unwrap();
/// assert_eq!(money.to_string(), "12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(Decimal);

/// Errors that can occur when creating Money
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Money has too many decimal places (max {MONEY_SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("Money exceeds maximum entry amount ({MAX_ENTRY_MAGNITUDE})")]
    Overflow,

    #[error("Invalid money format: {0}")]
    ParseError(String),
}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, MONEY_SCALE));

    /// Create Money with validation.
    ///
    /// Trailing zeros beyond two places are accepted (`1.500` is `1.50`);
    /// significant digits beyond two places are rejected.
    ///
    /// # Errors
    /// - `MoneyError::TooManyDecimals` if more than 2 significant decimal places
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        let normalized = value.normalize();
        if normalized.scale() > MONEY_SCALE {
            return Err(MoneyError::TooManyDecimals(normalized.scale()));
        }

        let mut value = normalized;
        value.rescale(MONEY_SCALE);
        Ok(Self(value))
    }

    /// Check that an amount may be recorded as an expense or split.
    ///
    /// # Errors
    /// - `MoneyError::Overflow` if |value| > [`MAX_ENTRY_MAGNITUDE`]
    pub fn check_entry_bound(self) -> Result<Self, MoneyError> {
        if self.0.abs() > Decimal::from(MAX_ENTRY_MAGNITUDE) {
            return Err(MoneyError::Overflow);
        }
        Ok(self)
    }

    /// Create Money from a whole number of currency units.
    pub fn from_units(units: i64) -> Result<Self, MoneyError> {
        Self::new(Decimal::from(units))
    }

    /// Create Money from a count of cents (`from_cents(1050)` is `10.50`).
    pub fn from_cents(cents: i64) -> Result<Self, MoneyError> {
        Self::new(Decimal::new(cents, MONEY_SCALE))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Money {
        Money(self.0.abs())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// True when |self| <= tolerance.
    pub fn is_within(&self, tolerance: Money) -> bool {
        self.0.abs() <= tolerance.0
    }

    pub fn min(self, other: Money) -> Money {
        if self <= other {
            self
        } else {
            other
        }
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|e| MoneyError::ParseError(e.to_string()))?;
        Money::new(decimal)
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Money::from_str(&value)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

// Sums of two-place values stay two-place, so arithmetic does not revalidate.
// Results may exceed MAX_ENTRY_MAGNITUDE. Decimal's own 96-bit range (~7.9e28)
// is only reachable after ~10^16 capped entries.

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}
