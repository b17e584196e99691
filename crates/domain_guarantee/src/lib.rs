//! Guarantee Letter Domain
//!
//! Bank guarantee letters issued against projects, the commission owed to the
//! issuing bank for each letter, and the payments made against that
//! commission.
//!
//! # Commission
//!
//! ```text
//! total commission = letter amount × commission rate / 100 + BSMV and other costs
//! remaining        = total commission − Σ payment amounts   (may go negative)
//! ```
//!
//! Overpayment is shown, never prevented.

pub mod letter;
pub mod payment;
pub mod commission;
pub mod error;

pub use letter::{GuaranteeLetter, LetterRecord, LetterType, LetterStatus, NewGuaranteeLetter, GuaranteeLetterPatch};
pub use payment::{LetterPayment, NewLetterPayment, LetterPaymentPatch};
pub use commission::{total_commission, PaymentSummary};
pub use error::GuaranteeError;
