//! Unit tests for currency codes and amount helpers

use core_kernel::{percent_of, round_amount, CurrencyCode, MoneyError};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod currency_codes {
    use super::*;

    #[test]
    fn test_code_is_uppercased() {
        let code: CurrencyCode = "try".parse().unwrap();
        assert_eq!(code.to_string(), "TRY");
    }

    #[test]
    fn test_code_rejects_symbols() {
        let result = CurrencyCode::new("US$");
        assert_eq!(result, Err(MoneyError::InvalidCurrency("US$".to_string())));
    }

    #[test]
    fn test_code_serializes_as_plain_string() {
        let code = CurrencyCode::new("eur").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"EUR\"");
    }

    #[test]
    fn test_code_deserialization_normalizes() {
        let code: CurrencyCode = serde_json::from_str("\" iqd\"").unwrap();
        assert_eq!(code.as_str(), "IQD");
    }

    #[test]
    fn test_blank_code_fails_deserialization() {
        let result: Result<CurrencyCode, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}

mod amounts {
    use super::*;

    #[test]
    fn test_percent_of_commission_rate() {
        assert_eq!(percent_of(dec!(100000), dec!(2)), dec!(2000));
    }

    #[test]
    fn test_percent_of_fractional_rate() {
        assert_eq!(percent_of(dec!(50000), dec!(1.25)), dec!(625));
    }

    #[test]
    fn test_round_amount_half_away_from_zero() {
        assert_eq!(round_amount(dec!(10.005)), dec!(10.01));
        assert_eq!(round_amount(dec!(-10.005)), dec!(-10.01));
        assert_eq!(round_amount(dec!(10.004)), dec!(10.00));
    }
}

proptest! {
    #[test]
    fn percent_of_hundred_is_identity(minor in -1_000_000_000i64..1_000_000_000i64) {
        let base = Decimal::new(minor, 2);
        prop_assert_eq!(percent_of(base, dec!(100)), base);
    }
}
