//! Commission reconciliation
//!
//! Summaries are recomputed from the stored letter and payments on every
//! request. Amounts are left at whatever scale the decimal arithmetic
//! produces; presentation rounding is the caller's concern.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{percent_of, LetterId};

use crate::letter::GuaranteeLetter;
use crate::payment::LetterPayment;

/// `letter_amount × commission_rate / 100 + bsmv_and_other_costs`
pub fn total_commission(
    letter_amount: Decimal,
    commission_rate: Decimal,
    bsmv_and_other_costs: Decimal,
) -> Decimal {
    percent_of(letter_amount, commission_rate) + bsmv_and_other_costs
}

/// Commission owed versus paid for one letter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub letter_id: LetterId,
    pub total_commission: Decimal,
    pub total_paid: Decimal,
    /// Σ of per-payment BSMV; the letter's own BSMV costs are already part of
    /// `total_commission`
    pub total_bsmv: Decimal,
    /// Negative when the commission has been overpaid
    pub remaining_commission: Decimal,
    /// Number of payments
    pub payments: usize,
    pub last_payment_date: Option<NaiveDate>,
}

impl PaymentSummary {
    /// Summarizes the payments that belong to `letter`
    ///
    /// Payments for other letters are ignored, so the full payment list can
    /// be passed in.
    pub fn compute<'a>(
        letter: &GuaranteeLetter,
        payments: impl IntoIterator<Item = &'a LetterPayment>,
    ) -> Self {
        let mut summary = Self::empty(letter);
        for payment in payments.into_iter().filter(|p| p.letter_id == letter.id) {
            summary.record(payment);
        }
        summary
    }

    /// Summarizes every letter from a single pass over all payments
    ///
    /// The result follows the order of `letters`.
    pub fn for_letters<'a>(
        letters: impl IntoIterator<Item = &'a GuaranteeLetter>,
        payments: &[LetterPayment],
    ) -> Vec<Self> {
        let mut by_letter: HashMap<LetterId, Vec<&LetterPayment>> = HashMap::new();
        for payment in payments {
            by_letter.entry(payment.letter_id).or_default().push(payment);
        }

        letters
            .into_iter()
            .map(|letter| {
                let mut summary = Self::empty(letter);
                for payment in by_letter.get(&letter.id).into_iter().flatten() {
                    summary.record(payment);
                }
                summary
            })
            .collect()
    }

    /// Returns true when more than the commission has been paid
    pub fn is_overpaid(&self) -> bool {
        self.remaining_commission < Decimal::ZERO
    }

    fn empty(letter: &GuaranteeLetter) -> Self {
        let total_commission = letter.total_commission();
        Self {
            letter_id: letter.id,
            total_commission,
            total_paid: Decimal::ZERO,
            total_bsmv: Decimal::ZERO,
            remaining_commission: total_commission,
            payments: 0,
            last_payment_date: None,
        }
    }

    fn record(&mut self, payment: &LetterPayment) {
        self.total_paid += payment.amount;
        self.total_bsmv += payment.bsmv;
        self.remaining_commission = self.total_commission - self.total_paid;
        self.payments += 1;
        self.last_payment_date = self.last_payment_date.max(Some(payment.payment_date));
    }
}
