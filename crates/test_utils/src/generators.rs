//! Property-Based Test Generators
//!
//! Proptest strategies for amounts, percentages, currencies, letter
//! variants and dates.

use chrono::{Days, NaiveDate};
use core_kernel::CurrencyCode;
use domain_credit::CreditStatus;
use domain_guarantee::{LetterStatus, LetterType};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::DateFixtures;

/// Strategy for non-negative amounts with two decimal places, below 10 million
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for strictly positive amounts with two decimal places
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for percentages between 0.00 and 100.00
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|basis| Decimal::new(basis, 2))
}

/// Strategy for strictly positive exchange rates with four decimal places
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|units| Decimal::new(units, 4))
}

/// Strategy for the seeded currency codes
pub fn currency_strategy() -> impl Strategy<Value = CurrencyCode> {
    prop_oneof![
        Just("TRY"),
        Just("USD"),
        Just("EUR"),
        Just("IQD"),
        Just("GBP"),
    ]
    .prop_filter_map("valid code", |code| CurrencyCode::new(code).ok())
}

pub fn letter_type_strategy() -> impl Strategy<Value = LetterType> {
    prop::sample::select(LetterType::ALL.to_vec())
}

pub fn letter_status_strategy() -> impl Strategy<Value = LetterStatus> {
    prop_oneof![
        Just(LetterStatus::Active),
        Just(LetterStatus::Pending),
        Just(LetterStatus::Closed),
        Just(LetterStatus::Cancelled),
    ]
}

pub fn credit_status_strategy() -> impl Strategy<Value = CreditStatus> {
    prop_oneof![
        Just(CreditStatus::Ongoing),
        Just(CreditStatus::Closed),
        Just(CreditStatus::Cancelled),
    ]
}

/// Strategy for dates within 120 days either side of the fixture "today"
pub fn date_around_today_strategy() -> impl Strategy<Value = NaiveDate> {
    (-120i64..=120i64).prop_map(|offset| {
        let today = DateFixtures::today();
        let days = Days::new(offset.unsigned_abs());
        if offset < 0 {
            today - days
        } else {
            today + days
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_amounts_are_non_negative(amount in amount_strategy()) {
            prop_assert!(amount >= Decimal::ZERO);
        }

        #[test]
        fn test_rates_are_positive(rate in rate_strategy()) {
            prop_assert!(rate > Decimal::ZERO);
        }

        #[test]
        fn test_dates_stay_near_today(date in date_around_today_strategy()) {
            let distance = (date - DateFixtures::today()).num_days().abs();
            prop_assert!(distance <= 120);
        }
    }
}
