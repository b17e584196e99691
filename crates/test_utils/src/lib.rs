//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! guarantee ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Fixed dates, currencies and directory records
//! - `builders`: Builders for letters, credits and payments with sensible defaults
//! - `database`: PostgreSQL test container with the schema applied
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use generators::*;
