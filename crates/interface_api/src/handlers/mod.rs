//! Request handlers
//!
//! Plain CRUD goes through the generic handlers in [`crud`]; the remaining
//! modules hold the endpoints that compute something.

pub mod crud;
pub mod health;
pub mod exchange_rates;
pub mod letter_payments;
pub mod credits;
pub mod dashboard;
