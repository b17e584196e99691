//! Dashboard figures
//!
//! # Rules
//!
//! - Upcoming letters: any status, expiry within `[today, today + 30]`
//! - Upcoming credits: ongoing only, maturity within the same window
//! - Overdue letters: active only, expiry before today
//! - Overdue credits: ongoing only, maturity before today
//! - Credit amount is principal plus interest
//!
//! When a target currency is given each row is converted before it is added;
//! sums are rounded to two decimals at the end.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use core_kernel::{round_amount, CurrencyCode, DueWindow};
use domain_credit::CreditRecord;
use domain_directory::RateTable;
use domain_guarantee::LetterRecord;

/// Label used in the per-bank breakdown when a letter's bank no longer exists
pub const UNKNOWN_BANK: &str = "Unknown";

/// Everything the dashboard is computed from
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub letters: Vec<LetterRecord>,
    pub credits: Vec<CreditRecord>,
    pub total_projects: usize,
    pub total_banks: usize,
}

/// Currency the sums should be expressed in
#[derive(Debug, Clone, Copy)]
pub struct TargetCurrency<'a> {
    pub code: &'a CurrencyCode,
    pub rates: &'a RateTable,
}

impl TargetCurrency<'_> {
    fn convert(&self, amount: Decimal, from: &CurrencyCode) -> Decimal {
        self.rates.convert(amount, from, self.code)
    }
}

/// Summary cards and chart series for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_letters: usize,
    pub active_letters: usize,
    pub total_letter_amount: Decimal,
    pub total_credits: usize,
    pub active_credits: usize,
    pub total_credit_amount: Decimal,
    pub total_repaid_amount: Decimal,
    pub upcoming_letter_payments: usize,
    pub upcoming_credit_payments: usize,
    pub overdue_letter_payments: usize,
    pub overdue_credit_payments: usize,
    pub total_projects: usize,
    pub total_banks: usize,
    /// Currency of the sums, `None` when they are raw unconverted totals
    pub currency: Option<CurrencyCode>,
    /// Letters per type
    pub letter_type_counts: BTreeMap<String, usize>,
    /// Letters per bank name
    pub bank_letter_counts: BTreeMap<String, usize>,
    /// Σ letter amount per `YYYY-MM` of creation, ascending
    pub monthly_letter_amounts: BTreeMap<String, Decimal>,
}

impl DashboardStats {
    /// Computes the dashboard in one pass over letters and credits
    pub fn compute(
        data: &DashboardData,
        window: DueWindow,
        target: Option<TargetCurrency<'_>>,
    ) -> Self {
        let in_target = |amount: Decimal, from: &CurrencyCode| match target {
            Some(t) => t.convert(amount, from),
            None => amount,
        };

        let mut stats = Self {
            total_letters: data.letters.len(),
            active_letters: 0,
            total_letter_amount: Decimal::ZERO,
            total_credits: data.credits.len(),
            active_credits: 0,
            total_credit_amount: Decimal::ZERO,
            total_repaid_amount: Decimal::ZERO,
            upcoming_letter_payments: 0,
            upcoming_credit_payments: 0,
            overdue_letter_payments: 0,
            overdue_credit_payments: 0,
            total_projects: data.total_projects,
            total_banks: data.total_banks,
            currency: target.map(|t| t.code.clone()),
            letter_type_counts: BTreeMap::new(),
            bank_letter_counts: BTreeMap::new(),
            monthly_letter_amounts: BTreeMap::new(),
        };

        for letter in &data.letters {
            let amount = in_target(letter.letter_amount, &letter.currency);
            stats.total_letter_amount += amount;

            if letter.is_active() {
                stats.active_letters += 1;
            }
            if let Some(expiry) = letter.expiry_date {
                if window.is_upcoming(expiry) {
                    stats.upcoming_letter_payments += 1;
                } else if letter.is_active() && window.is_overdue(expiry) {
                    stats.overdue_letter_payments += 1;
                }
            }

            *stats
                .letter_type_counts
                .entry(letter.letter_type.to_string())
                .or_default() += 1;
            *stats
                .bank_letter_counts
                .entry(letter.bank_name().unwrap_or(UNKNOWN_BANK).to_string())
                .or_default() += 1;
            let month = format!("{:04}-{:02}", letter.created_at.year(), letter.created_at.month());
            *stats.monthly_letter_amounts.entry(month).or_default() += amount;
        }

        for credit in &data.credits {
            stats.total_credit_amount += in_target(credit.total_amount(), &credit.currency);
            stats.total_repaid_amount += in_target(credit.total_repaid_amount, &credit.currency);

            if credit.is_ongoing() {
                stats.active_credits += 1;
                if window.is_upcoming(credit.maturity_date) {
                    stats.upcoming_credit_payments += 1;
                } else if window.is_overdue(credit.maturity_date) {
                    stats.overdue_credit_payments += 1;
                }
            }
        }

        stats.total_letter_amount = round_amount(stats.total_letter_amount);
        stats.total_credit_amount = round_amount(stats.total_credit_amount);
        stats.total_repaid_amount = round_amount(stats.total_repaid_amount);
        for amount in stats.monthly_letter_amounts.values_mut() {
            *amount = round_amount(*amount);
        }

        debug!(
            letters = stats.total_letters,
            credits = stats.total_credits,
            currency = stats.currency.as_ref().map(|c| c.as_str()),
            "Computed dashboard stats"
        );

        stats
    }
}
