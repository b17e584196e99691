//! Project, bank, currency and exchange-rate bodies

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use domain_directory::{
    BankContact, BankPatch, CurrencyPatch, ExchangeRatePatch, NewBank, NewCurrency,
    NewExchangeRate, NewProject, ProjectPatch,
};

use super::{double_option, non_blank, required};
use crate::error::{ApiError, FieldError};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(
        required(message = "name is required"),
        length(max = 255, message = "name must be at most 255 characters")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<CreateProjectRequest> for NewProject {
    type Error = ApiError;

    fn try_from(req: CreateProjectRequest) -> Result<Self, Self::Error> {
        let project = NewProject::new(required(req.name, "name")?)
            .map_err(FieldError::from)?
            .with_description(req.description)
            .with_status(req.status)
            .map_err(FieldError::from)?;
        Ok(project)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
}

impl TryFrom<UpdateProjectRequest> for ProjectPatch {
    type Error = ApiError;

    fn try_from(req: UpdateProjectRequest) -> Result<Self, Self::Error> {
        Ok(ProjectPatch {
            name: non_blank(req.name, "name")?,
            description: req.description,
            status: non_blank(req.status, "status")?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBankRequest {
    #[validate(
        required(message = "name is required"),
        length(max = 255, message = "name must be at most 255 characters")
    )]
    pub name: Option<String>,
    pub code: Option<String>,
    pub branch_name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<CreateBankRequest> for NewBank {
    type Error = ApiError;

    fn try_from(req: CreateBankRequest) -> Result<Self, Self::Error> {
        let contact = BankContact {
            code: req.code,
            branch_name: req.branch_name,
            contact_person: req.contact_person,
            phone: req.phone,
            email: req.email,
            address: req.address,
        };
        let bank = NewBank::new(required(req.name, "name")?)
            .map_err(FieldError::from)?
            .with_contact(contact)
            .with_status(req.status)
            .map_err(FieldError::from)?;
        Ok(bank)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBankRequest {
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub branch_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact_person: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    pub status: Option<String>,
}

impl TryFrom<UpdateBankRequest> for BankPatch {
    type Error = ApiError;

    fn try_from(req: UpdateBankRequest) -> Result<Self, Self::Error> {
        Ok(BankPatch {
            name: non_blank(req.name, "name")?,
            code: req.code,
            branch_name: req.branch_name,
            contact_person: req.contact_person,
            phone: req.phone,
            email: req.email,
            address: req.address,
            status: non_blank(req.status, "status")?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCurrencyRequest {
    #[validate(required(message = "code is required"))]
    pub code: Option<String>,
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub is_active: Option<bool>,
}

impl TryFrom<CreateCurrencyRequest> for NewCurrency {
    type Error = ApiError;

    fn try_from(req: CreateCurrencyRequest) -> Result<Self, Self::Error> {
        let code = ApiError::currency("code", &required(req.code, "code")?)?;
        let mut currency = NewCurrency::new(code, required(req.name, "name")?)
            .map_err(FieldError::from)?
            .with_symbol(req.symbol);
        if let Some(is_active) = req.is_active {
            currency.is_active = is_active;
        }
        Ok(currency)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCurrencyRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub symbol: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl TryFrom<UpdateCurrencyRequest> for CurrencyPatch {
    type Error = ApiError;

    fn try_from(req: UpdateCurrencyRequest) -> Result<Self, Self::Error> {
        let code = match req.code {
            Some(code) => Some(ApiError::currency("code", &code)?),
            None => None,
        };
        Ok(CurrencyPatch {
            code,
            name: non_blank(req.name, "name")?,
            symbol: req.symbol,
            is_active: req.is_active,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExchangeRateRequest {
    #[validate(required(message = "fromCurrency is required"))]
    pub from_currency: Option<String>,
    #[validate(required(message = "toCurrency is required"))]
    pub to_currency: Option<String>,
    #[validate(required(message = "rate is required"))]
    pub rate: Option<Decimal>,
}

impl TryFrom<CreateExchangeRateRequest> for NewExchangeRate {
    type Error = ApiError;

    fn try_from(req: CreateExchangeRateRequest) -> Result<Self, Self::Error> {
        let from = ApiError::currency("fromCurrency", &required(req.from_currency, "fromCurrency")?)?;
        let to = ApiError::currency("toCurrency", &required(req.to_currency, "toCurrency")?)?;
        let rate = NewExchangeRate::new(from, to, required(req.rate, "rate")?)
            .map_err(FieldError::from)?;
        Ok(rate)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExchangeRateRequest {
    pub rate: Option<Decimal>,
}

impl TryFrom<UpdateExchangeRateRequest> for ExchangeRatePatch {
    type Error = ApiError;

    fn try_from(req: UpdateExchangeRateRequest) -> Result<Self, Self::Error> {
        Ok(ExchangeRatePatch::new(req.rate).map_err(FieldError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_project_defaults() {
        let req: CreateProjectRequest = serde_json::from_str(r#"{"name": "Dam"}"#).unwrap();
        let new = NewProject::try_from(req).unwrap();
        assert_eq!(new.status, "active");
        assert!(new.description.is_none());
    }

    #[test]
    fn test_blank_project_name_is_rejected() {
        let req: CreateProjectRequest = serde_json::from_str(r#"{"name": "   "}"#).unwrap();
        match NewProject::try_from(req) {
            Err(ApiError::Validation(errors)) => assert_eq!(errors[0].field, "name"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_name_fails_validation() {
        let req: CreateProjectRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rate_accepts_number_or_string() {
        let number: CreateExchangeRateRequest =
            serde_json::from_str(r#"{"fromCurrency": "usd", "toCurrency": "TRY", "rate": 32.5}"#)
                .unwrap();
        let string: CreateExchangeRateRequest =
            serde_json::from_str(r#"{"fromCurrency": "USD", "toCurrency": "TRY", "rate": "32.5"}"#)
                .unwrap();
        let a = NewExchangeRate::try_from(number).unwrap();
        let b = NewExchangeRate::try_from(string).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rate, dec!(32.5));
    }

    #[test]
    fn test_same_currency_rate_names_to_currency() {
        let req: CreateExchangeRateRequest =
            serde_json::from_str(r#"{"fromCurrency": "TRY", "toCurrency": "TRY", "rate": 1}"#)
                .unwrap();
        match NewExchangeRate::try_from(req) {
            Err(ApiError::Validation(errors)) => assert_eq!(errors[0].field, "toCurrency"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_bank_patch_clears_with_null() {
        let req: UpdateBankRequest =
            serde_json::from_str(r#"{"phone": null, "email": "ops@bank.test"}"#).unwrap();
        let patch = BankPatch::try_from(req).unwrap();
        assert_eq!(patch.phone, Some(None));
        assert_eq!(patch.email, Some(Some("ops@bank.test".to_string())));
        assert_eq!(patch.code, None);
    }
}
