//! Money types with precise decimal arithmetic
//!
//! This module provides a representation of monetary values using
//! rust_decimal for precise calculations without floating-point errors.
//! All amounts are normalized to 2 decimal places using
//! round-half-away-from-zero, so computed values can be compared and
//! summed without drift.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// A monetary amount with 2 decimal places
///
/// Money is a currency-agnostic amount; the loan aggregate carries the
/// currency tag separately as a [`CurrencyCode`]. Every constructor and
/// arithmetic result is rounded half-away-from-zero to 2 decimal places,
/// which keeps installment sums exact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a new Money value, rounding to 2 decimal places
    pub fn new(amount: Decimal) -> Self {
        Self(round_currency(amount))
    }

    /// Creates Money from a whole number of currency units
    pub fn from_major(major_units: i64) -> Self {
        Self(Decimal::new(major_units, 0))
    }

    /// Creates Money from an integer amount in minor units (cents)
    pub fn from_minor(minor_units: i64) -> Self {
        Self(Decimal::new(minor_units, 2))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiplies by a scalar, rounding the result
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.0 * factor)
    }

    /// Divides by a scalar, rounding the result
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Self::new(self.0 / divisor))
    }

    /// Splits the amount into `n` parts that sum exactly to the original
    ///
    /// The first `n - 1` parts each receive `round(total / n)`; the final
    /// part absorbs the rounding remainder. When the amount is too small
    /// to cover `n` parts the final part can go negative, so callers that
    /// require non-negative parts must check the result.
    pub fn allocate_evenly(&self, n: u32) -> Result<Vec<Money>, MoneyError> {
        if n == 0 {
            return Err(MoneyError::InvalidAmount(
                "Cannot allocate to zero parts".to_string(),
            ));
        }

        let regular = self.divide(Decimal::from(n))?;
        let mut parts = vec![regular; n as usize - 1];
        let allocated = regular.multiply(Decimal::from(n - 1));
        parts.push(*self - allocated);

        Ok(parts)
    }
}

/// Rounds to 2 decimal places, half away from zero
fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::new(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

/// A free-form currency code tag (e.g. "USD", "AED")
///
/// The payroll system does not convert between currencies; the code is a
/// classification carried on the loan. Codes are trimmed and upper-cased
/// on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    const MAX_LEN: usize = 8;

    /// Creates a currency code, normalizing to upper case
    pub fn new(code: impl AsRef<str>) -> Result<Self, MoneyError> {
        let code = code.as_ref().trim().to_uppercase();
        if code.is_empty() {
            return Err(MoneyError::InvalidCurrency(
                "currency code must not be empty".to_string(),
            ));
        }
        if code.len() > Self::MAX_LEN {
            return Err(MoneyError::InvalidCurrency(code));
        }
        Ok(Self(code))
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The default currency used when none is supplied
    pub fn usd() -> Self {
        Self("USD".to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
