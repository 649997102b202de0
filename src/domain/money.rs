//! Lossless monetary types backed by rust_decimal.
//!
//! `Money` carries order amounts and commissions; `Rate` carries a
//! commission fraction validated to [0, 1]. Both serialize to JSON numbers
//! and format to canonical strings (no exponent notation) for storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A monetary amount in the order's currency units.
///
/// Backed by rust_decimal to avoid floating-point drift in commission
/// arithmetic. Serializes to a JSON number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_negative()
    }

    /// Format as a canonical string for storage (trailing zeros trimmed,
    /// no exponent notation).
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    pub fn inner(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Money)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl std::ops::Mul<Rate> for Money {
    type Output = Money;

    fn mul(self, rhs: Rate) -> Money {
        Money(self.0 * rhs.0)
    }
}

/// A commission rate as a fraction, e.g. 0.1 = 10%.
///
/// Validated to [0, 1] at construction so a stored rate can never inflate a
/// commission past the order subtotal. Deserialization goes through the same
/// check, so serde cannot smuggle in an out-of-range rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Rate(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

#[derive(Debug, Error)]
pub enum RateError {
    #[error("rate is not a valid decimal: {0}")]
    Parse(String),
    #[error("rate {0} is outside [0, 1]")]
    OutOfRange(Decimal),
}

impl Rate {
    pub fn new(value: Decimal) -> Result<Self, RateError> {
        if value.is_sign_negative() || value > Decimal::ONE {
            return Err(RateError::OutOfRange(value));
        }
        Ok(Rate(value))
    }

    pub fn zero() -> Self {
        Rate(Decimal::ZERO)
    }

    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    pub fn inner(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Rate {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|_| RateError::Parse(s.to_string()))?;
        Rate::new(value)
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = RateError;

    fn try_from(value: Decimal) -> Result<Self, RateError> {
        Rate::new(value)
    }
}
