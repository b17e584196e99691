//! Tests for commission reconciliation

use chrono::{NaiveDate, Utc};
use core_kernel::{BankId, CurrencyCode, LetterId, LetterPaymentId, ProjectId};
use domain_guarantee::{
    total_commission, GuaranteeLetter, LetterPayment, LetterStatus, LetterType, PaymentSummary,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn letter(letter_amount: Decimal, commission_rate: Decimal, costs: Decimal) -> GuaranteeLetter {
    let now = Utc::now();
    GuaranteeLetter {
        id: LetterId::new(),
        bank_id: BankId::new(),
        project_id: ProjectId::new(),
        letter_type: LetterType::Standard,
        contract_amount: dec!(1000000),
        letter_percentage: dec!(10),
        letter_amount,
        commission_rate,
        bsmv_and_other_costs: costs,
        currency: CurrencyCode::new("TRY").unwrap(),
        purchase_date: date(2024, 1, 10),
        letter_date: date(2024, 1, 12),
        expiry_date: Some(date(2025, 1, 12)),
        status: LetterStatus::Active,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn payment(letter_id: LetterId, amount: Decimal, bsmv: Decimal, paid_on: NaiveDate) -> LetterPayment {
    let now = Utc::now();
    LetterPayment {
        id: LetterPaymentId::new(),
        letter_id,
        payment_date: paid_on,
        amount,
        bsmv,
        receipt_no: None,
        description: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_reference_example() {
    let letter = letter(dec!(100000), dec!(2), dec!(500));
    let payments = vec![
        payment(letter.id, dec!(1000), dec!(50), date(2024, 3, 1)),
        payment(letter.id, dec!(500), dec!(25), date(2024, 5, 1)),
    ];

    let summary = PaymentSummary::compute(&letter, &payments);

    assert_eq!(summary.total_commission, dec!(2500));
    assert_eq!(summary.total_paid, dec!(1500));
    assert_eq!(summary.remaining_commission, dec!(1000));
    assert_eq!(summary.total_bsmv, dec!(75));
    assert_eq!(summary.payments, 2);
    assert_eq!(summary.last_payment_date, Some(date(2024, 5, 1)));
    assert!(!summary.is_overpaid());
}

#[test]
fn test_no_payments() {
    let letter = letter(dec!(50000), dec!(1.5), dec!(0));
    let summary = PaymentSummary::compute(&letter, &[]);
    assert_eq!(summary.total_commission, dec!(750));
    assert_eq!(summary.remaining_commission, dec!(750));
    assert_eq!(summary.payments, 0);
    assert_eq!(summary.last_payment_date, None);
}

#[test]
fn test_last_payment_date_ignores_insertion_order() {
    let letter = letter(dec!(10000), dec!(1), dec!(0));
    let payments = vec![
        payment(letter.id, dec!(10), dec!(0), date(2024, 9, 1)),
        payment(letter.id, dec!(10), dec!(0), date(2024, 2, 1)),
    ];
    let summary = PaymentSummary::compute(&letter, &payments);
    assert_eq!(summary.last_payment_date, Some(date(2024, 9, 1)));
}

#[test]
fn test_overpayment_goes_negative() {
    let letter = letter(dec!(10000), dec!(1), dec!(0));
    let payments = vec![payment(letter.id, dec!(150), dec!(0), date(2024, 2, 1))];
    let summary = PaymentSummary::compute(&letter, &payments);
    assert_eq!(summary.remaining_commission, dec!(-50));
    assert!(summary.is_overpaid());
}

#[test]
fn test_payments_of_other_letters_ignored() {
    let letter = letter(dec!(10000), dec!(1), dec!(0));
    let payments = vec![
        payment(letter.id, dec!(40), dec!(0), date(2024, 2, 1)),
        payment(LetterId::new(), dec!(60), dec!(0), date(2024, 3, 1)),
    ];
    let summary = PaymentSummary::compute(&letter, &payments);
    assert_eq!(summary.total_paid, dec!(40));
    assert_eq!(summary.payments, 1);
}

#[test]
fn test_for_letters_matches_compute() {
    let a = letter(dec!(100000), dec!(2), dec!(500));
    let b = letter(dec!(20000), dec!(3), dec!(0));
    let payments = vec![
        payment(a.id, dec!(1000), dec!(0), date(2024, 3, 1)),
        payment(b.id, dec!(200), dec!(10), date(2024, 4, 1)),
        payment(a.id, dec!(500), dec!(0), date(2024, 5, 1)),
    ];

    let summaries = PaymentSummary::for_letters([&a, &b], &payments);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0], PaymentSummary::compute(&a, &payments));
    assert_eq!(summaries[1], PaymentSummary::compute(&b, &payments));
    assert_eq!(summaries[1].remaining_commission, dec!(400));
}

#[test]
fn test_summary_serializes_camel_case() {
    let letter = letter(dec!(100000), dec!(2), dec!(500));
    let json = serde_json::to_value(PaymentSummary::compute(&letter, &[])).unwrap();
    let total: Decimal = json["totalCommission"].as_str().unwrap().parse().unwrap();
    assert_eq!(total, dec!(2500));
    assert_eq!(json["payments"], 0);
    assert!(json["lastPaymentDate"].is_null());
}

proptest! {
    #[test]
    fn prop_commission_independent_of_payments(
        amount_cents in 0i64..10_000_000_000i64,
        rate_bp in 0i64..10_000i64,
        costs_cents in 0i64..100_000_000i64,
        paid in proptest::collection::vec(1i64..10_000_000i64, 0..8),
    ) {
        let letter_amount = Decimal::new(amount_cents, 2);
        let rate = Decimal::new(rate_bp, 2);
        let costs = Decimal::new(costs_cents, 2);
        let letter = letter(letter_amount, rate, costs);
        let payments: Vec<_> = paid
            .iter()
            .map(|c| payment(letter.id, Decimal::new(*c, 2), Decimal::ZERO, date(2024, 1, 1)))
            .collect();

        let summary = PaymentSummary::compute(&letter, &payments);
        let expected_paid: Decimal = payments.iter().map(|p| p.amount).sum();

        prop_assert_eq!(summary.total_commission, total_commission(letter_amount, rate, costs));
        prop_assert_eq!(summary.total_commission, letter_amount * rate / dec!(100) + costs);
        prop_assert_eq!(summary.remaining_commission, summary.total_commission - expected_paid);
        prop_assert_eq!(summary.payments, payments.len());
    }
}
