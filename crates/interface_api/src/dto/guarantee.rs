//! Guarantee letter and letter payment bodies

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use core_kernel::{BankId, CurrencyCode, LetterId, ProjectId};
use domain_guarantee::{
    GuaranteeLetterPatch, LetterPaymentPatch, LetterStatus, LetterType, NewGuaranteeLetter,
    NewLetterPayment,
};

use super::{date, double_option, required, FlexDate};
use crate::error::{ApiError, FieldError};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLetterRequest {
    #[validate(required(message = "bankId is required"))]
    pub bank_id: Option<BankId>,
    #[validate(required(message = "projectId is required"))]
    pub project_id: Option<ProjectId>,
    #[validate(required(message = "letterType is required"))]
    pub letter_type: Option<String>,
    #[validate(required(message = "contractAmount is required"))]
    pub contract_amount: Option<Decimal>,
    #[validate(required(message = "letterPercentage is required"))]
    pub letter_percentage: Option<Decimal>,
    #[validate(required(message = "letterAmount is required"))]
    pub letter_amount: Option<Decimal>,
    #[validate(required(message = "commissionRate is required"))]
    pub commission_rate: Option<Decimal>,
    pub bsmv_and_other_costs: Option<Decimal>,
    #[validate(required(message = "currency is required"))]
    pub currency: Option<String>,
    #[validate(required(message = "purchaseDate is required"))]
    pub purchase_date: Option<FlexDate>,
    #[validate(required(message = "letterDate is required"))]
    pub letter_date: Option<FlexDate>,
    pub expiry_date: Option<FlexDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<CreateLetterRequest> for NewGuaranteeLetter {
    type Error = ApiError;

    fn try_from(req: CreateLetterRequest) -> Result<Self, Self::Error> {
        let letter = NewGuaranteeLetter {
            bank_id: required(req.bank_id, "bankId")?,
            project_id: required(req.project_id, "projectId")?,
            letter_type: letter_type(&required(req.letter_type, "letterType")?)?,
            contract_amount: required(req.contract_amount, "contractAmount")?,
            letter_percentage: required(req.letter_percentage, "letterPercentage")?,
            letter_amount: required(req.letter_amount, "letterAmount")?,
            commission_rate: required(req.commission_rate, "commissionRate")?,
            bsmv_and_other_costs: req.bsmv_and_other_costs.unwrap_or(Decimal::ZERO),
            currency: currency(&required(req.currency, "currency")?)?,
            purchase_date: required(req.purchase_date, "purchaseDate")?.into(),
            letter_date: required(req.letter_date, "letterDate")?.into(),
            expiry_date: date(req.expiry_date),
            status: req.status.as_deref().map(letter_status).transpose()?.unwrap_or_default(),
            notes: req.notes,
        };
        letter.validate().map_err(FieldError::from)?;
        Ok(letter)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLetterRequest {
    pub bank_id: Option<BankId>,
    pub project_id: Option<ProjectId>,
    pub letter_type: Option<String>,
    pub contract_amount: Option<Decimal>,
    pub letter_percentage: Option<Decimal>,
    pub letter_amount: Option<Decimal>,
    pub commission_rate: Option<Decimal>,
    pub bsmv_and_other_costs: Option<Decimal>,
    pub currency: Option<String>,
    pub purchase_date: Option<FlexDate>,
    pub letter_date: Option<FlexDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub expiry_date: Option<Option<FlexDate>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl TryFrom<UpdateLetterRequest> for GuaranteeLetterPatch {
    type Error = ApiError;

    fn try_from(req: UpdateLetterRequest) -> Result<Self, Self::Error> {
        let patch = GuaranteeLetterPatch {
            bank_id: req.bank_id,
            project_id: req.project_id,
            letter_type: req.letter_type.as_deref().map(letter_type).transpose()?,
            contract_amount: req.contract_amount,
            letter_percentage: req.letter_percentage,
            letter_amount: req.letter_amount,
            commission_rate: req.commission_rate,
            bsmv_and_other_costs: req.bsmv_and_other_costs,
            currency: req.currency.as_deref().map(currency).transpose()?,
            purchase_date: date(req.purchase_date),
            letter_date: date(req.letter_date),
            expiry_date: req.expiry_date.map(date),
            status: req.status.as_deref().map(letter_status).transpose()?,
            notes: req.notes,
        };
        patch.validate().map_err(FieldError::from)?;
        Ok(patch)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[validate(required(message = "letterId is required"))]
    pub letter_id: Option<LetterId>,
    #[validate(required(message = "paymentDate is required"))]
    pub payment_date: Option<FlexDate>,
    #[validate(required(message = "amount is required"))]
    pub amount: Option<Decimal>,
    pub bsmv: Option<Decimal>,
    pub receipt_no: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<CreatePaymentRequest> for NewLetterPayment {
    type Error = ApiError;

    fn try_from(req: CreatePaymentRequest) -> Result<Self, Self::Error> {
        let payment = NewLetterPayment {
            letter_id: required(req.letter_id, "letterId")?,
            payment_date: required(req.payment_date, "paymentDate")?.into(),
            amount: required(req.amount, "amount")?,
            bsmv: req.bsmv.unwrap_or(Decimal::ZERO),
            receipt_no: req.receipt_no,
            description: req.description,
        };
        payment.validate().map_err(FieldError::from)?;
        Ok(payment)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    pub letter_id: Option<LetterId>,
    pub payment_date: Option<FlexDate>,
    pub amount: Option<Decimal>,
    pub bsmv: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    pub receipt_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

impl TryFrom<UpdatePaymentRequest> for LetterPaymentPatch {
    type Error = ApiError;

    fn try_from(req: UpdatePaymentRequest) -> Result<Self, Self::Error> {
        let patch = LetterPaymentPatch {
            letter_id: req.letter_id,
            payment_date: date(req.payment_date),
            amount: req.amount,
            bsmv: req.bsmv,
            receipt_no: req.receipt_no,
            description: req.description,
        };
        patch.validate().map_err(FieldError::from)?;
        Ok(patch)
    }
}

fn letter_type(value: &str) -> Result<LetterType, FieldError> {
    value.parse().map_err(FieldError::from)
}

fn letter_status(value: &str) -> Result<LetterStatus, FieldError> {
    value.parse().map_err(FieldError::from)
}

fn currency(value: &str) -> Result<CurrencyCode, ApiError> {
    ApiError::currency("currency", value)
}
