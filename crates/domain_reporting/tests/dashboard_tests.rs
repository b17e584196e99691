//! Dashboard aggregation tests

use core_kernel::DueWindow;
use domain_credit::CreditStatus;
use domain_guarantee::{LetterStatus, LetterType};
use domain_reporting::{DashboardData, DashboardStats, TargetCurrency, UNKNOWN_BANK};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_utils::{
    credit_status_strategy, date_around_today_strategy, letter_status_strategy, CreditBuilder,
    CurrencyFixtures, DateFixtures, DirectoryFixtures, LetterBuilder,
};

fn window() -> DueWindow {
    DueWindow::starting(DateFixtures::today())
}

fn stats(data: &DashboardData) -> DashboardStats {
    DashboardStats::compute(data, window(), None)
}

#[test]
fn test_empty_dashboard() {
    let data = DashboardData {
        total_projects: 3,
        total_banks: 2,
        ..DashboardData::default()
    };
    let stats = stats(&data);

    assert_eq!(stats.total_letters, 0);
    assert_eq!(stats.total_letter_amount, Decimal::ZERO);
    assert_eq!(stats.total_projects, 3);
    assert_eq!(stats.total_banks, 2);
    assert!(stats.currency.is_none());
    assert!(stats.monthly_letter_amounts.is_empty());
}

#[test]
fn test_counts_and_sums() {
    let data = DashboardData {
        letters: vec![
            LetterBuilder::new().with_amount(dec!(1000)).build_record(),
            LetterBuilder::new()
                .with_amount(dec!(250.50))
                .with_status(LetterStatus::Closed)
                .build_record(),
        ],
        credits: vec![
            CreditBuilder::new()
                .with_amounts(dec!(10000), dec!(1500))
                .with_repaid(dec!(4000))
                .build_record(),
            CreditBuilder::new()
                .with_amounts(dec!(2000), dec!(0))
                .with_status(CreditStatus::Closed)
                .build_record(),
        ],
        total_projects: 1,
        total_banks: 1,
    };
    let stats = stats(&data);

    assert_eq!(stats.total_letters, 2);
    assert_eq!(stats.active_letters, 1);
    assert_eq!(stats.total_letter_amount, dec!(1250.50));
    assert_eq!(stats.total_credits, 2);
    assert_eq!(stats.active_credits, 1);
    assert_eq!(stats.total_credit_amount, dec!(13500));
    assert_eq!(stats.total_repaid_amount, dec!(4000));
}

#[test]
fn test_letter_window_boundaries() {
    let letters = [
        // today and the last day of the window are upcoming
        Some(DateFixtures::today()),
        Some(DateFixtures::days_after(30)),
        // one past the horizon is neither
        Some(DateFixtures::days_after(31)),
        // yesterday is overdue
        Some(DateFixtures::days_before(1)),
        None,
    ]
    .into_iter()
    .map(|expiry| LetterBuilder::new().with_expiry(expiry).build_record())
    .collect();

    let stats = stats(&DashboardData {
        letters,
        ..DashboardData::default()
    });

    assert_eq!(stats.upcoming_letter_payments, 2);
    assert_eq!(stats.overdue_letter_payments, 1);
}

#[test]
fn test_upcoming_letters_ignore_status_but_overdue_needs_active() {
    let letters = vec![
        LetterBuilder::new()
            .with_status(LetterStatus::Closed)
            .with_expiry(Some(DateFixtures::days_after(5)))
            .build_record(),
        LetterBuilder::new()
            .with_status(LetterStatus::Cancelled)
            .with_expiry(Some(DateFixtures::days_before(5)))
            .build_record(),
        LetterBuilder::new()
            .with_status(LetterStatus::Pending)
            .with_expiry(Some(DateFixtures::days_before(5)))
            .build_record(),
    ];
    let stats = stats(&DashboardData {
        letters,
        ..DashboardData::default()
    });

    assert_eq!(stats.upcoming_letter_payments, 1);
    assert_eq!(stats.overdue_letter_payments, 0);
}

#[test]
fn test_credit_windows_only_count_ongoing() {
    let credits = vec![
        CreditBuilder::new()
            .with_maturity(DateFixtures::days_after(10))
            .build_record(),
        CreditBuilder::new()
            .with_maturity(DateFixtures::days_after(10))
            .with_status(CreditStatus::Closed)
            .build_record(),
        CreditBuilder::new()
            .with_maturity(DateFixtures::days_before(3))
            .build_record(),
        CreditBuilder::new()
            .with_maturity(DateFixtures::days_before(3))
            .with_status(CreditStatus::Cancelled)
            .build_record(),
    ];
    let stats = stats(&DashboardData {
        credits,
        ..DashboardData::default()
    });

    assert_eq!(stats.upcoming_credit_payments, 1);
    assert_eq!(stats.overdue_credit_payments, 1);
}

#[test]
fn test_conversion_to_target_currency() {
    let rates = CurrencyFixtures::rate_table();
    let target_code = CurrencyFixtures::try_();
    let target = TargetCurrency {
        code: &target_code,
        rates: &rates,
    };
    let data = DashboardData {
        letters: vec![
            LetterBuilder::new()
                .with_amount(dec!(100))
                .with_currency(CurrencyFixtures::usd())
                .build_record(),
            LetterBuilder::new().with_amount(dec!(500)).build_record(),
        ],
        credits: vec![CreditBuilder::new()
            .with_amounts(dec!(10), dec!(0))
            .with_repaid(dec!(2))
            .with_currency(CurrencyFixtures::eur())
            .build_record()],
        ..DashboardData::default()
    };

    let stats = DashboardStats::compute(&data, window(), Some(target));

    assert_eq!(stats.currency, Some(CurrencyFixtures::try_()));
    assert_eq!(stats.total_letter_amount, dec!(3500));
    assert_eq!(stats.total_credit_amount, dec!(350));
    assert_eq!(stats.total_repaid_amount, dec!(70));
}

#[test]
fn test_inverse_conversion_is_rounded() {
    let rates = CurrencyFixtures::rate_table();
    let target_code = CurrencyFixtures::usd();
    let target = TargetCurrency {
        code: &target_code,
        rates: &rates,
    };
    let data = DashboardData {
        letters: vec![LetterBuilder::new().with_amount(dec!(100)).build_record()],
        ..DashboardData::default()
    };

    let stats = DashboardStats::compute(&data, window(), Some(target));

    // 100 / 30 = 3.333...
    assert_eq!(stats.total_letter_amount, dec!(3.33));
}

#[test]
fn test_missing_rate_keeps_amount_unchanged() {
    let rates = CurrencyFixtures::rate_table();
    let target_code = CurrencyFixtures::iqd();
    let target = TargetCurrency {
        code: &target_code,
        rates: &rates,
    };
    let data = DashboardData {
        letters: vec![LetterBuilder::new().with_amount(dec!(42)).build_record()],
        ..DashboardData::default()
    };

    let stats = DashboardStats::compute(&data, window(), Some(target));

    assert_eq!(stats.total_letter_amount, dec!(42));
}

#[test]
fn test_breakdowns() {
    let bank = DirectoryFixtures::bank("Halkbank");
    let data = DashboardData {
        letters: vec![
            LetterBuilder::new()
                .with_bank(bank.clone())
                .with_type(LetterType::Advance)
                .with_amount(dec!(100))
                .with_created_at(DateFixtures::created_in(3))
                .build_record(),
            LetterBuilder::new()
                .with_bank(bank)
                .with_amount(dec!(50))
                .with_created_at(DateFixtures::created_in(3))
                .build_record(),
            LetterBuilder::new()
                .with_type(LetterType::Advance)
                .with_amount(dec!(7))
                .with_created_at(DateFixtures::created_in(11))
                .build_record(),
        ],
        ..DashboardData::default()
    };

    let stats = stats(&data);

    assert_eq!(stats.letter_type_counts.get("advance"), Some(&2));
    assert_eq!(stats.letter_type_counts.get("standard"), Some(&1));
    assert_eq!(stats.bank_letter_counts.get("Halkbank"), Some(&2));
    assert_eq!(stats.bank_letter_counts.get(UNKNOWN_BANK), Some(&1));

    let months: Vec<_> = stats.monthly_letter_amounts.iter().collect();
    assert_eq!(
        months,
        vec![
            (&"2024-03".to_string(), &dec!(150)),
            (&"2024-11".to_string(), &dec!(7)),
        ]
    );
}

#[test]
fn test_serializes_camel_case() {
    let stats = stats(&DashboardData::default());
    let json = serde_json::to_value(&stats).unwrap();

    assert!(json.get("totalLetters").is_some());
    assert!(json.get("upcomingLetterPayments").is_some());
    assert!(json.get("monthlyLetterAmounts").is_some());
    assert!(json["currency"].is_null());
}

proptest! {
    #[test]
    fn test_window_counts_are_disjoint_and_bounded(
        letters in prop::collection::vec(
            (proptest::option::of(date_around_today_strategy()), letter_status_strategy()),
            0..20,
        ),
        credits in prop::collection::vec(
            (date_around_today_strategy(), credit_status_strategy()),
            0..20,
        ),
    ) {
        let data = DashboardData {
            letters: letters
                .iter()
                .map(|(expiry, status)| {
                    LetterBuilder::new().with_expiry(*expiry).with_status(*status).build_record()
                })
                .collect(),
            credits: credits
                .iter()
                .map(|(maturity, status)| {
                    CreditBuilder::new().with_maturity(*maturity).with_status(*status).build_record()
                })
                .collect(),
            ..DashboardData::default()
        };

        let stats = DashboardStats::compute(&data, window(), None);

        prop_assert!(stats.upcoming_letter_payments + stats.overdue_letter_payments <= stats.total_letters);
        prop_assert!(stats.overdue_letter_payments <= stats.active_letters);
        prop_assert!(stats.upcoming_credit_payments + stats.overdue_credit_payments <= stats.active_credits);
        prop_assert_eq!(stats.letter_type_counts.values().sum::<usize>(), stats.total_letters);
        prop_assert_eq!(stats.bank_letter_counts.values().sum::<usize>(), stats.total_letters);
    }
}
