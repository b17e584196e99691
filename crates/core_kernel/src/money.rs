//! Currency codes and decimal amount helpers
//!
//! Amounts are plain `rust_decimal::Decimal` values; the currency of a letter
//! or credit is stored next to the amount as a [`CurrencyCode`]. Codes are
//! free-form (the rate table is maintained by hand and includes codes such as
//! `IQD`), so they are only normalized, not checked against ISO 4217.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Scale used when presenting aggregated amounts
pub const AMOUNT_SCALE: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A currency code such as `TRY`, `USD` or `EUR`
///
/// Codes are trimmed and upper-cased on construction so that lookups in the
/// exchange-rate table are not sensitive to how a form was filled in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a currency code, rejecting blank or overlong input
    pub fn new(code: impl AsRef<str>) -> Result<Self, MoneyError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty()
            || trimmed.len() > 10
            || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(MoneyError::InvalidCurrency(code.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> String {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns `percent`% of `base`
///
/// # Example
///
/// ```rust
/// use core_kernel::percent_of;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(percent_of(dec!(100000), dec!(2)), dec!(2000));
/// ```
pub fn percent_of(base: Decimal, percent: Decimal) -> Decimal {
    base * percent / dec!(100)
}

/// Rounds an amount to [`AMOUNT_SCALE`] decimal places (half away from zero)
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AMOUNT_SCALE, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
