//! Value Objects for the storefront

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// Product identifier, stable for the lifetime of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(value: u64) -> Self { Self(value) }
    pub fn value(&self) -> u64 { self.0 }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self { Self(value) }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Money value object.
///
/// Non-negative by construction. Always rendered with exactly two decimal places,
/// both through `Display` and when serialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() { return Err(MoneyError::Negative); }
        Ok(Self(amount))
    }
    pub fn zero() -> Self { Self(Decimal::ZERO) }
    pub fn amount(&self) -> Decimal { self.0 }
    pub fn checked_add(&self, other: &Money) -> Option<Money> { self.0.checked_add(other.0).map(Money) }
    pub fn checked_multiply(&self, qty: u32) -> Option<Money> { self.0.checked_mul(Decimal::from(qty)).map(Money) }
    /// Saturates at `Decimal::MAX`.
    pub fn saturating_add(&self, other: &Money) -> Money { Money(self.0.saturating_add(other.0)) }
    /// Saturates at `Decimal::MAX`.
    pub fn saturating_multiply(&self, qty: u32) -> Money { Money(self.0.saturating_mul(Decimal::from(qty))) }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:.2}", self.0.round_dp(2)) }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self { iter.fold(Money::zero(), |acc, m| acc.saturating_add(&m)) }
}

impl Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::new(amount).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum MoneyError { Negative }
impl std::error::Error for MoneyError {}
impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Negative amount") }
}

/// Units of a product available for purchase; the ceiling for any cart line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockCount(u32);

impl StockCount {
    pub fn new(value: u32) -> Self { Self(value) }
    pub fn value(&self) -> u32 { self.0 }
    pub fn is_zero(&self) -> bool { self.0 == 0 }
    /// Whether `quantity` units fit under this ceiling.
    pub fn allows(&self, quantity: u32) -> bool { quantity <= self.0 }
}
