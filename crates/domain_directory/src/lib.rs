//! Directory Domain
//!
//! The reference data every letter and credit points at: the projects being
//! built, the banks issuing guarantees and credits, the currencies in use and
//! the hand-maintained exchange-rate table used for display conversion.
//!
//! # Key Concepts
//!
//! - **Project**: a construction/business project letters and credits back
//! - **Bank**: an issuing bank with branch and contact details
//! - **Exchange rate**: one stored rate per ordered currency pair
//! - **Rate table**: in-memory lookup that converts through a direct or an
//!   inverse rate and silently falls back to the unconverted amount

pub mod project;
pub mod bank;
pub mod currency;
pub mod exchange;
pub mod related;
pub mod error;

pub use project::{Project, NewProject, ProjectPatch};
pub use bank::{Bank, BankContact, NewBank, BankPatch};
pub use currency::{Currency, NewCurrency, CurrencyPatch, ExchangeRate, NewExchangeRate, ExchangeRatePatch};
pub use exchange::{RateTable, Conversion, RateSource};
pub use related::Related;
pub use error::DirectoryError;

/// Status given to projects and banks created without one
pub const DEFAULT_STATUS: &str = "active";

/// Trims a required text field, rejecting blank values
pub(crate) fn required_text(value: impl Into<String>, field: &'static str) -> Result<String, DirectoryError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DirectoryError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}
