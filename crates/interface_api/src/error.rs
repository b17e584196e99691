//! API error handling
//!
//! Every failure leaves the API in one of three shapes:
//!
//! | Variant      | Status | `error`            | `message`              |
//! |--------------|--------|--------------------|------------------------|
//! | `Validation` | 400    | `validation_error` | `Invalid data`         |
//! | `NotFound`   | 404    | `not_found`        | `<Entity> not found`   |
//! | `Internal`   | 500    | `internal_error`   | `Failed to <action>`   |
//!
//! Internal causes are logged where they are mapped and never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use core_kernel::{MoneyError, PortError};
use domain_credit::CreditError;
use domain_directory::DirectoryError;
use domain_guarantee::GuaranteeError;

/// One rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The error for a required field that was not sent
    pub fn required(field: &str) -> Self {
        Self::new(field, format!("{field} is required"))
    }
}

impl From<DirectoryError> for FieldError {
    fn from(err: DirectoryError) -> Self {
        Self::new(err.field(), err.to_string())
    }
}

impl From<GuaranteeError> for FieldError {
    fn from(err: GuaranteeError) -> Self {
        Self::new(err.field(), err.to_string())
    }
}

impl From<CreditError> for FieldError {
    fn from(err: CreditError) -> Self {
        Self::new(err.field(), err.to_string())
    }
}

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid data")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to {0}")]
    Internal(String),
}

impl ApiError {
    /// A single-field validation failure
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(format!("{entity} not found"))
    }

    /// Maps a repository failure, logging anything that becomes a 500
    pub fn from_port(err: PortError, action: impl Into<String>) -> Self {
        let action = action.into();
        match err {
            PortError::NotFound { entity_type, .. } => Self::not_found(&entity_type),
            PortError::Validation { message, field } => {
                Self::invalid(field.unwrap_or_else(|| "body".to_string()), message)
            }
            other => {
                error!(error = %other, action = %action, "Request failed");
                ApiError::Internal(action)
            }
        }
    }

    /// Parses a currency code from request input
    pub fn currency(field: &str, code: &str) -> Result<core_kernel::CurrencyCode, Self> {
        core_kernel::CurrencyCode::new(code)
            .map_err(|err: MoneyError| Self::invalid(field, err.to_string()))
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::Validation(vec![err])
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

/// Attaches the failed action to a repository result
pub trait PortResultExt<T> {
    fn failed_to(self, action: &str) -> Result<T, ApiError>;
}

impl<T> PortResultExt<T> for Result<T, PortError> {
    fn failed_to(self, action: &str) -> Result<T, ApiError> {
        self.map_err(|err| ApiError::from_port(err, action))
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_type, errors) = match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, "validation_error", Some(errors))
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_not_found_maps_to_404() {
        let err = ApiError::from_port(PortError::not_found("Bank", "x"), "fetch bank");
        assert_eq!(err.to_string(), "Bank not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_port_validation_keeps_field() {
        let err = ApiError::from_port(
            PortError::validation_field("Bank does not exist", "bankId"),
            "create guarantee letter",
        );
        match err {
            ApiError::Validation(errors) => assert_eq!(errors[0].field, "bankId"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_internal_hides_cause() {
        let err = ApiError::from_port(PortError::internal("relation missing"), "fetch banks");
        assert_eq!(err.to_string(), "Failed to fetch banks");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_conflict_is_internal() {
        let err = ApiError::from_port(PortError::conflict("duplicate code"), "create currency");
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
