//! In-memory currency conversion over the stored rate table
//!
//! Lookup order for `amount` in `from` expressed in `to`:
//! 1. same currency: unchanged
//! 2. stored `from → to` rate: `amount × rate`
//! 3. stored `to → from` rate: `amount ÷ rate` (a zero rate counts as missing)
//! 4. otherwise the amount is returned unconverted
//!
//! The fallback is silent on purpose for the dashboard; callers that need to
//! know what happened use [`RateTable::conversion`].

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::CurrencyCode;

use crate::currency::ExchangeRate;
use crate::error::DirectoryError;

/// How a conversion was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Identity,
    Direct,
    Inverse,
    Unavailable,
}

/// Result of a single conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub amount: Decimal,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub converted: Decimal,
    pub source: RateSource,
}

/// Lookup table keyed by ordered currency pair
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(CurrencyCode, CurrencyCode), Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from stored rows
    pub fn from_rates<'a>(rates: impl IntoIterator<Item = &'a ExchangeRate>) -> Self {
        let mut table = Self::new();
        for rate in rates {
            table.insert(rate.from_currency.clone(), rate.to_currency.clone(), rate.rate);
        }
        table
    }

    /// Adds or replaces the rate for `from → to`
    pub fn insert(&mut self, from: CurrencyCode, to: CurrencyCode, rate: Decimal) {
        self.rates.insert((from, to), rate);
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    fn lookup(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<Decimal> {
        self.rates.get(&(from.clone(), to.clone())).copied()
    }

    /// Converts and reports how the rate was found
    ///
    /// # Errors
    ///
    /// `ConversionOverflow` when the product or quotient does not fit in a
    /// `Decimal`.
    pub fn conversion(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Conversion, DirectoryError> {
        let (converted, source) = if from == to {
            (Some(amount), RateSource::Identity)
        } else if let Some(rate) = self.lookup(from, to) {
            (amount.checked_mul(rate), RateSource::Direct)
        } else {
            match self.lookup(to, from) {
                Some(inverse) if !inverse.is_zero() => {
                    (amount.checked_div(inverse), RateSource::Inverse)
                }
                _ => (Some(amount), RateSource::Unavailable),
            }
        };
        let converted = converted.ok_or_else(|| DirectoryError::ConversionOverflow {
            amount: amount.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        })?;

        Ok(Conversion {
            amount,
            from: from.clone(),
            to: to.clone(),
            converted,
            source,
        })
    }

    /// Converts `amount`, falling back to the unconverted amount when no
    /// rate applies or the result would overflow
    pub fn convert(&self, amount: Decimal, from: &CurrencyCode, to: &CurrencyCode) -> Decimal {
        self.conversion(amount, from, to)
            .map(|c| c.converted)
            .unwrap_or(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code(c: &str) -> CurrencyCode {
        CurrencyCode::new(c).unwrap()
    }

    #[test]
    fn test_identity() {
        let table = RateTable::new();
        let c = table.conversion(dec!(12.5), &code("TRY"), &code("TRY")).unwrap();
        assert_eq!(c.converted, dec!(12.5));
        assert_eq!(c.source, RateSource::Identity);
    }

    #[test]
    fn test_direct_rate_multiplies() {
        let mut table = RateTable::new();
        table.insert(code("USD"), code("TRY"), dec!(32.5));
        assert_eq!(table.convert(dec!(100), &code("USD"), &code("TRY")), dec!(3250.0));
    }

    #[test]
    fn test_zero_inverse_is_ignored() {
        let mut table = RateTable::new();
        table.insert(code("TRY"), code("USD"), dec!(0));
        let c = table.conversion(dec!(100), &code("USD"), &code("TRY")).unwrap();
        assert_eq!(c.converted, dec!(100));
        assert_eq!(c.source, RateSource::Unavailable);
    }

    #[test]
    fn test_direct_overflow_is_an_error() {
        let mut table = RateTable::new();
        table.insert(code("USD"), code("IQD"), dec!(1310));

        let err = table.conversion(Decimal::MAX, &code("USD"), &code("IQD")).unwrap_err();
        assert_eq!(err.field(), "amount");
        assert_eq!(table.convert(Decimal::MAX, &code("USD"), &code("IQD")), Decimal::MAX);
    }

    #[test]
    fn test_inverse_overflow_is_an_error() {
        let mut table = RateTable::new();
        table.insert(code("TRY"), code("USD"), dec!(0.000763));

        let amount = dec!(70000000000000000000000000000);
        assert!(matches!(
            table.conversion(amount, &code("USD"), &code("TRY")),
            Err(DirectoryError::ConversionOverflow { .. })
        ));
    }
}
