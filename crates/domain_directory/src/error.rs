//! Directory domain errors

use thiserror::Error;

/// Errors that can occur in the directory domain
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Exchange rate must be positive, got {0}")]
    NonPositiveRate(String),

    #[error("Exchange rate {0} must be between 0.000001 and 999999.999999")]
    RateOutOfRange(String),

    #[error("Exchange rate needs two different currencies, got {0} twice")]
    SameCurrency(String),

    #[error("Converting {amount} {from} to {to} overflows")]
    ConversionOverflow {
        amount: String,
        from: String,
        to: String,
    },
}

impl DirectoryError {
    /// The wire field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            DirectoryError::EmptyField(field) => *field,
            DirectoryError::NonPositiveRate(_) | DirectoryError::RateOutOfRange(_) => "rate",
            DirectoryError::SameCurrency(_) => "toCurrency",
            DirectoryError::ConversionOverflow { .. } => "amount",
        }
    }
}
