//! Credit domain errors

use thiserror::Error;

/// Errors that can occur in the credit domain
#[derive(Debug, Error)]
pub enum CreditError {
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: String },

    #[error("Maturity date {maturity} is before credit date {credit}")]
    MaturityBeforeCreditDate { credit: String, maturity: String },

    #[error("Unknown credit status: {0:?}")]
    UnknownStatus(String),
}

impl CreditError {
    /// The wire field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            CreditError::NegativeAmount { field, .. } => *field,
            CreditError::MaturityBeforeCreditDate { .. } => "maturityDate",
            CreditError::UnknownStatus(_) => "status",
        }
    }
}
