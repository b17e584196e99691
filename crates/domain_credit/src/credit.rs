//! Credits

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BankId, CreditId, CurrencyCode, Entity, ProjectId};
use domain_directory::Related;

use crate::error::CreditError;

/// Repayment status of a credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
    /// Still being repaid
    #[default]
    #[serde(alias = "devam-ediyor")]
    Ongoing,
    /// Fully repaid
    #[serde(alias = "kapali")]
    Closed,
    #[serde(alias = "iptal")]
    Cancelled,
}

impl CreditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditStatus::Ongoing => "ongoing",
            CreditStatus::Closed => "closed",
            CreditStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreditStatus {
    type Err = CreditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ongoing" | "devam-ediyor" => Ok(CreditStatus::Ongoing),
            "closed" | "kapali" => Ok(CreditStatus::Closed),
            "cancelled" | "iptal" => Ok(CreditStatus::Cancelled),
            _ => Err(CreditError::UnknownStatus(s.to_string())),
        }
    }
}

/// A stored credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credit {
    /// Unique identifier
    pub id: CreditId,
    /// Lending bank
    pub bank_id: BankId,
    /// Project the credit finances
    pub project_id: ProjectId,
    /// Amount borrowed
    pub principal_amount: Decimal,
    /// Total interest agreed for the term
    pub interest_amount: Decimal,
    /// Repaid so far
    pub total_repaid_amount: Decimal,
    pub currency: CurrencyCode,
    pub credit_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub status: CreditStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A credit joined with its bank and project
pub type CreditRecord = Related<Credit>;

impl Credit {
    /// Principal plus interest
    pub fn total_amount(&self) -> Decimal {
        self.principal_amount + self.interest_amount
    }

    /// Total still owed; negative if more was repaid than owed
    pub fn outstanding_amount(&self) -> Decimal {
        self.total_amount() - self.total_repaid_amount
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == CreditStatus::Ongoing
    }
}

impl Entity for Credit {
    const NAME: &'static str = "Credit";

    type Id = CreditId;
    type Record = CreditRecord;
    type New = NewCredit;
    type Patch = CreditPatch;
}

/// A create payload with defaults already applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewCredit {
    pub bank_id: BankId,
    pub project_id: ProjectId,
    pub principal_amount: Decimal,
    pub interest_amount: Decimal,
    pub total_repaid_amount: Decimal,
    pub currency: CurrencyCode,
    pub credit_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub status: CreditStatus,
    pub notes: Option<String>,
}

impl NewCredit {
    /// Rejects negative amounts and a maturity before the credit date
    pub fn validate(&self) -> Result<(), CreditError> {
        non_negative("principalAmount", self.principal_amount)?;
        non_negative("interestAmount", self.interest_amount)?;
        non_negative("totalRepaidAmount", self.total_repaid_amount)?;
        if self.maturity_date < self.credit_date {
            return Err(CreditError::MaturityBeforeCreditDate {
                credit: self.credit_date.to_string(),
                maturity: self.maturity_date.to_string(),
            });
        }
        Ok(())
    }
}

/// Fields to change on an existing credit; `notes: Some(None)` clears notes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditPatch {
    pub bank_id: Option<BankId>,
    pub project_id: Option<ProjectId>,
    pub principal_amount: Option<Decimal>,
    pub interest_amount: Option<Decimal>,
    pub total_repaid_amount: Option<Decimal>,
    pub currency: Option<CurrencyCode>,
    pub credit_date: Option<NaiveDate>,
    pub maturity_date: Option<NaiveDate>,
    pub status: Option<CreditStatus>,
    pub notes: Option<Option<String>>,
}

impl CreditPatch {
    /// Rejects negative amounts among the provided fields
    ///
    /// Date ordering is only checked when both dates are in the patch; the
    /// stored counterpart is not consulted.
    pub fn validate(&self) -> Result<(), CreditError> {
        let amounts = [
            ("principalAmount", self.principal_amount),
            ("interestAmount", self.interest_amount),
            ("totalRepaidAmount", self.total_repaid_amount),
        ];
        for (field, value) in amounts {
            if let Some(value) = value {
                non_negative(field, value)?;
            }
        }
        if let (Some(credit), Some(maturity)) = (self.credit_date, self.maturity_date) {
            if maturity < credit {
                return Err(CreditError::MaturityBeforeCreditDate {
                    credit: credit.to_string(),
                    maturity: maturity.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: Decimal) -> Result<(), CreditError> {
    if value < Decimal::ZERO {
        return Err(CreditError::NegativeAmount {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
