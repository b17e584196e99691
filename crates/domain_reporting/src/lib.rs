//! Reporting Domain
//!
//! Everything the dashboard shows is derived here from the full set of
//! letters and credits, in memory and in a single pass. Nothing is cached;
//! the figures are recomputed per request.

pub mod dashboard;

pub use dashboard::{DashboardData, DashboardStats, TargetCurrency, UNKNOWN_BANK};
