//! Commission payments made against a letter

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Entity, LetterId, LetterPaymentId};

use crate::error::GuaranteeError;
use crate::letter::non_negative;

/// One installment paid toward a letter's commission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterPayment {
    pub id: LetterPaymentId,
    pub letter_id: LetterId,
    pub payment_date: NaiveDate,
    pub amount: Decimal,
    /// BSMV charged on this payment, tracked apart from the letter's own costs
    pub bsmv: Decimal,
    pub receipt_no: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for LetterPayment {
    const NAME: &'static str = "LetterPayment";

    type Id = LetterPaymentId;
    type Record = LetterPayment;
    type New = NewLetterPayment;
    type Patch = LetterPaymentPatch;
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLetterPayment {
    pub letter_id: LetterId,
    pub payment_date: NaiveDate,
    pub amount: Decimal,
    pub bsmv: Decimal,
    pub receipt_no: Option<String>,
    pub description: Option<String>,
}

impl NewLetterPayment {
    /// The amount must be positive and the BSMV non-negative
    pub fn validate(&self) -> Result<(), GuaranteeError> {
        positive("amount", self.amount)?;
        non_negative("bsmv", self.bsmv)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LetterPaymentPatch {
    pub letter_id: Option<LetterId>,
    pub payment_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub bsmv: Option<Decimal>,
    pub receipt_no: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

impl LetterPaymentPatch {
    pub fn validate(&self) -> Result<(), GuaranteeError> {
        if let Some(amount) = self.amount {
            positive("amount", amount)?;
        }
        if let Some(bsmv) = self.bsmv {
            non_negative("bsmv", bsmv)?;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: Decimal) -> Result<(), GuaranteeError> {
    if value <= Decimal::ZERO {
        return Err(GuaranteeError::NonPositiveAmount {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
