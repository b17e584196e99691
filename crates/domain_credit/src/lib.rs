//! Credit Domain
//!
//! Bank credits (loans) drawn for a project: principal, interest, how much has
//! been repaid and when the credit matures.

pub mod credit;
pub mod error;

pub use credit::{Credit, CreditRecord, CreditStatus, NewCredit, CreditPatch};
pub use error::CreditError;
