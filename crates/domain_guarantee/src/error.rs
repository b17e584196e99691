//! Guarantee domain errors

use thiserror::Error;

/// Errors that can occur in the guarantee domain
#[derive(Debug, Error)]
pub enum GuaranteeError {
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: String },

    #[error("{field} must be greater than zero, got {value}")]
    NonPositiveAmount { field: &'static str, value: String },

    #[error("Unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
}

impl GuaranteeError {
    /// The wire field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            GuaranteeError::NegativeAmount { field, .. }
            | GuaranteeError::NonPositiveAmount { field, .. } => *field,
            GuaranteeError::UnknownVariant { kind, .. } => *kind,
        }
    }
}
