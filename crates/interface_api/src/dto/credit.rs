//! Credit bodies

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use core_kernel::{BankId, ProjectId};
use domain_credit::{CreditPatch, CreditStatus, NewCredit};

use super::{date, double_option, required, FlexDate};
use crate::error::{ApiError, FieldError};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditRequest {
    #[validate(required(message = "bankId is required"))]
    pub bank_id: Option<BankId>,
    #[validate(required(message = "projectId is required"))]
    pub project_id: Option<ProjectId>,
    #[validate(required(message = "principalAmount is required"))]
    pub principal_amount: Option<Decimal>,
    #[validate(required(message = "interestAmount is required"))]
    pub interest_amount: Option<Decimal>,
    pub total_repaid_amount: Option<Decimal>,
    #[validate(required(message = "currency is required"))]
    pub currency: Option<String>,
    #[validate(required(message = "creditDate is required"))]
    pub credit_date: Option<FlexDate>,
    #[validate(required(message = "maturityDate is required"))]
    pub maturity_date: Option<FlexDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<CreateCreditRequest> for NewCredit {
    type Error = ApiError;

    fn try_from(req: CreateCreditRequest) -> Result<Self, Self::Error> {
        let credit = NewCredit {
            bank_id: required(req.bank_id, "bankId")?,
            project_id: required(req.project_id, "projectId")?,
            principal_amount: required(req.principal_amount, "principalAmount")?,
            interest_amount: required(req.interest_amount, "interestAmount")?,
            total_repaid_amount: req.total_repaid_amount.unwrap_or(Decimal::ZERO),
            currency: ApiError::currency("currency", &required(req.currency, "currency")?)?,
            credit_date: required(req.credit_date, "creditDate")?.into(),
            maturity_date: required(req.maturity_date, "maturityDate")?.into(),
            status: req.status.as_deref().map(status).transpose()?.unwrap_or_default(),
            notes: req.notes,
        };
        credit.validate().map_err(FieldError::from)?;
        Ok(credit)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCreditRequest {
    pub bank_id: Option<BankId>,
    pub project_id: Option<ProjectId>,
    pub principal_amount: Option<Decimal>,
    pub interest_amount: Option<Decimal>,
    pub total_repaid_amount: Option<Decimal>,
    pub currency: Option<String>,
    pub credit_date: Option<FlexDate>,
    pub maturity_date: Option<FlexDate>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl TryFrom<UpdateCreditRequest> for CreditPatch {
    type Error = ApiError;

    fn try_from(req: UpdateCreditRequest) -> Result<Self, Self::Error> {
        let currency = match req.currency {
            Some(code) => Some(ApiError::currency("currency", &code)?),
            None => None,
        };
        let patch = CreditPatch {
            bank_id: req.bank_id,
            project_id: req.project_id,
            principal_amount: req.principal_amount,
            interest_amount: req.interest_amount,
            total_repaid_amount: req.total_repaid_amount,
            currency,
            credit_date: date(req.credit_date),
            maturity_date: date(req.maturity_date),
            status: req.status.as_deref().map(status).transpose()?,
            notes: req.notes,
        };
        patch.validate().map_err(FieldError::from)?;
        Ok(patch)
    }
}

fn status(value: &str) -> Result<CreditStatus, FieldError> {
    value.parse().map_err(FieldError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credit_defaults() {
        let req: CreateCreditRequest = serde_json::from_value(json!({
            "bankId": "550e8400-e29b-41d4-a716-446655440002",
            "projectId": "550e8400-e29b-41d4-a716-446655440001",
            "principalAmount": 50000,
            "interestAmount": "2500.50",
            "currency": "USD",
            "creditDate": "2024-01-01",
            "maturityDate": "2025-01-01"
        }))
        .unwrap();
        let new = NewCredit::try_from(req).unwrap();
        assert_eq!(new.status, CreditStatus::Ongoing);
        assert_eq!(new.total_repaid_amount, Decimal::ZERO);
    }

    #[test]
    fn test_maturity_before_credit_date() {
        let req: CreateCreditRequest = serde_json::from_value(json!({
            "bankId": "550e8400-e29b-41d4-a716-446655440002",
            "projectId": "550e8400-e29b-41d4-a716-446655440001",
            "principalAmount": 1,
            "interestAmount": 0,
            "currency": "USD",
            "creditDate": "2024-06-01",
            "maturityDate": "2024-01-01"
        }))
        .unwrap();
        match NewCredit::try_from(req) {
            Err(ApiError::Validation(errors)) => assert_eq!(errors[0].field, "maturityDate"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_legacy_status_alias() {
        let req: UpdateCreditRequest =
            serde_json::from_value(json!({"status": "devam-ediyor", "notes": null})).unwrap();
        let patch = CreditPatch::try_from(req).unwrap();
        assert_eq!(patch.status, Some(CreditStatus::Ongoing));
        assert_eq!(patch.notes, Some(None));
    }
}
