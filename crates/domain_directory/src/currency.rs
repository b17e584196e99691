//! Currencies and stored exchange rates

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use core_kernel::{CurrencyCode, CurrencyId, Entity, ExchangeRateId};

use crate::error::DirectoryError;
use crate::required_text;

/// A currency amounts can be recorded or displayed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: CurrencyId,
    pub code: CurrencyCode,
    pub name: String,
    pub symbol: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated create payload; new currencies start active
#[derive(Debug, Clone, PartialEq)]
pub struct NewCurrency {
    pub code: CurrencyCode,
    pub name: String,
    pub symbol: Option<String>,
    pub is_active: bool,
}

impl NewCurrency {
    pub fn new(code: CurrencyCode, name: impl Into<String>) -> Result<Self, DirectoryError> {
        Ok(Self {
            code,
            name: required_text(name, "name")?,
            symbol: None,
            is_active: true,
        })
    }

    pub fn with_symbol(mut self, symbol: Option<String>) -> Self {
        self.symbol = symbol;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencyPatch {
    pub code: Option<CurrencyCode>,
    pub name: Option<String>,
    pub symbol: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl Entity for Currency {
    const NAME: &'static str = "Currency";

    type Id = CurrencyId;
    type Record = Currency;
    type New = NewCurrency;
    type Patch = CurrencyPatch;
}

/// A manually entered rate: one unit of `from_currency` buys `rate` units of
/// `to_currency`
///
/// At most one row exists per ordered pair; entering the pair again replaces
/// the rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub id: ExchangeRateId,
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    pub rate: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// A validated rate for an upsert
#[derive(Debug, Clone, PartialEq)]
pub struct NewExchangeRate {
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    pub rate: Decimal,
}

impl NewExchangeRate {
    /// Validates the pair and the rate
    ///
    /// # Errors
    ///
    /// Rejects a non-positive rate and a pair whose two sides are the same
    /// currency.
    pub fn new(
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
        rate: Decimal,
    ) -> Result<Self, DirectoryError> {
        validate_rate(rate)?;
        if from_currency == to_currency {
            return Err(DirectoryError::SameCurrency(from_currency.to_string()));
        }
        Ok(Self {
            from_currency,
            to_currency,
            rate,
        })
    }
}

/// Only the rate of a stored pair can change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeRatePatch {
    pub rate: Option<Decimal>,
}

impl ExchangeRatePatch {
    pub fn new(rate: Option<Decimal>) -> Result<Self, DirectoryError> {
        if let Some(rate) = rate {
            validate_rate(rate)?;
        }
        Ok(Self { rate })
    }
}

/// Decimal places a stored rate keeps
const RATE_SCALE: u32 = 6;

/// Rates are stored as `NUMERIC(12, 6)`; anything at or above this no
/// longer fits once rounded
const RATE_LIMIT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

fn validate_rate(rate: Decimal) -> Result<(), DirectoryError> {
    if rate <= Decimal::ZERO {
        return Err(DirectoryError::NonPositiveRate(rate.to_string()));
    }
    let stored = rate.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if stored.is_zero() || stored >= RATE_LIMIT {
        return Err(DirectoryError::RateOutOfRange(rate.to_string()));
    }
    Ok(())
}

impl Entity for ExchangeRate {
    const NAME: &'static str = "ExchangeRate";

    type Id = ExchangeRateId;
    type Record = ExchangeRate;
    type New = NewExchangeRate;
    type Patch = ExchangeRatePatch;
}
