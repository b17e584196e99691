//! Pre-built Test Fixtures
//!
//! Ready-to-use, predictable test data. Dates are anchored on a fixed
//! "today" so window classification does not depend on the wall clock.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use core_kernel::{BankId, CurrencyCode, ExchangeRateId, ProjectId};
use domain_directory::{Bank, ExchangeRate, Project, RateTable, DEFAULT_STATUS};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for dates relative to a fixed reference day
pub struct DateFixtures;

impl DateFixtures {
    /// The reference "today" (June 15, 2024)
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// `days` after today
    pub fn days_after(days: u64) -> NaiveDate {
        Self::today().checked_add_days(Days::new(days)).unwrap()
    }

    /// `days` before today
    pub fn days_before(days: u64) -> NaiveDate {
        Self::today().checked_sub_days(Days::new(days)).unwrap()
    }

    /// A creation timestamp in the given month of 2024
    pub fn created_in(month: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, 10, 9, 0, 0).unwrap()
    }
}

/// Fixture for currency codes
pub struct CurrencyFixtures;

impl CurrencyFixtures {
    pub fn try_() -> CurrencyCode {
        CurrencyCode::new("TRY").unwrap()
    }

    pub fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    pub fn eur() -> CurrencyCode {
        CurrencyCode::new("EUR").unwrap()
    }

    pub fn iqd() -> CurrencyCode {
        CurrencyCode::new("IQD").unwrap()
    }

    /// A stored rate row
    pub fn rate(from: CurrencyCode, to: CurrencyCode, rate: Decimal) -> ExchangeRate {
        ExchangeRate {
            id: ExchangeRateId::new(),
            from_currency: from,
            to_currency: to,
            rate,
            updated_at: Utc::now(),
        }
    }

    /// USD→TRY at 30 and EUR→TRY at 35
    pub fn rate_table() -> RateTable {
        RateTable::from_rates(&[
            Self::rate(Self::usd(), Self::try_(), dec!(30)),
            Self::rate(Self::eur(), Self::try_(), dec!(35)),
        ])
    }
}

/// Fixture for projects and banks
pub struct DirectoryFixtures;

impl DirectoryFixtures {
    /// Deterministic project id
    pub fn project_id() -> ProjectId {
        ProjectId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Deterministic bank id
    pub fn bank_id() -> BankId {
        BankId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    pub fn project(name: &str) -> Project {
        let now = Utc::now();
        Project {
            id: ProjectId::new(),
            name: name.to_string(),
            description: None,
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn bank(name: &str) -> Bank {
        let now = Utc::now();
        Bank {
            id: BankId::new(),
            name: name.to_string(),
            code: None,
            branch_name: None,
            contact_person: None,
            phone: None,
            email: None,
            address: None,
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_dates() {
        assert_eq!(DateFixtures::days_after(30), NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
        assert_eq!(DateFixtures::days_before(1), NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
    }

    #[test]
    fn test_rate_table_fixture() {
        let table = CurrencyFixtures::rate_table();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.convert(dec!(2), &CurrencyFixtures::usd(), &CurrencyFixtures::try_()),
            dec!(60)
        );
    }
}
