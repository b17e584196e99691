//! Core Kernel - Foundational types shared by every guarantee ledger crate
//!
//! This crate provides the building blocks used across the domain and
//! infrastructure layers:
//! - Strongly-typed identifiers for each stored record
//! - The generic repository port every entity store implements
//! - Currency codes and decimal amount helpers
//! - Due-date windows for upcoming/overdue classification

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{CurrencyCode, MoneyError, AMOUNT_SCALE, percent_of, round_amount};
pub use temporal::{DueState, DueWindow, UPCOMING_WINDOW_DAYS};
pub use identifiers::{
    ProjectId, BankId, CurrencyId, ExchangeRateId, LetterId, CreditId, LetterPaymentId,
};
pub use ports::{Entity, Repository, ListFilter, PortError};
