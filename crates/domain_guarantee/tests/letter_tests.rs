//! Tests for letter and payment payloads

use chrono::NaiveDate;
use core_kernel::{BankId, CurrencyCode, LetterId, ProjectId};
use domain_guarantee::{
    GuaranteeError, GuaranteeLetterPatch, LetterStatus, LetterType, NewGuaranteeLetter,
    NewLetterPayment, LetterPaymentPatch,
};
use rust_decimal_macros::dec;

fn new_letter() -> NewGuaranteeLetter {
    NewGuaranteeLetter {
        bank_id: BankId::new(),
        project_id: ProjectId::new(),
        letter_type: LetterType::Advance,
        contract_amount: dec!(500000),
        letter_percentage: dec!(6),
        letter_amount: dec!(30000),
        commission_rate: dec!(1.25),
        bsmv_and_other_costs: dec!(0),
        currency: CurrencyCode::new("USD").unwrap(),
        purchase_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        letter_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        expiry_date: None,
        status: LetterStatus::default(),
        notes: None,
    }
}

#[test]
fn test_valid_letter_passes() {
    assert!(new_letter().validate().is_ok());
}

#[test]
fn test_negative_commission_rate_rejected() {
    let mut letter = new_letter();
    letter.commission_rate = dec!(-1);
    let err = letter.validate().unwrap_err();
    assert!(matches!(err, GuaranteeError::NegativeAmount { field: "commissionRate", .. }));
}

#[test]
fn test_patch_checks_only_present_fields() {
    assert!(GuaranteeLetterPatch::default().validate().is_ok());
    let patch = GuaranteeLetterPatch {
        letter_amount: Some(dec!(-5)),
        ..Default::default()
    };
    assert_eq!(patch.validate().unwrap_err().field(), "letterAmount");
}

#[test]
fn test_all_legacy_spellings() {
    let cases = [
        ("teminat", LetterType::Standard),
        ("avans", LetterType::Advance),
        ("kesin-teminat", LetterType::Final),
        ("gecici-teminat", LetterType::Temporary),
    ];
    for (input, expected) in cases {
        assert_eq!(input.parse::<LetterType>().unwrap(), expected);
        let json = format!("\"{input}\"");
        assert_eq!(serde_json::from_str::<LetterType>(&json).unwrap(), expected);
    }
    assert_eq!(LetterType::ALL.len(), 4);
}

#[test]
fn test_payment_amount_must_be_positive() {
    let payment = NewLetterPayment {
        letter_id: LetterId::new(),
        payment_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        amount: dec!(0),
        bsmv: dec!(0),
        receipt_no: None,
        description: None,
    };
    assert_eq!(payment.validate().unwrap_err().field(), "amount");

    let patch = LetterPaymentPatch {
        bsmv: Some(dec!(-1)),
        ..Default::default()
    };
    assert_eq!(patch.validate().unwrap_err().field(), "bsmv");
}
