//! Guarantee letters
//!
//! A letter is issued by a bank on behalf of a project for a share of a
//! contract's value. The letter amount is normally
//! `contract amount × letter percentage / 100`, but it is entered and stored
//! separately and is allowed to differ.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{percent_of, BankId, CurrencyCode, Entity, LetterId, ProjectId};
use domain_directory::Related;

use crate::commission::total_commission;
use crate::error::GuaranteeError;

/// Kind of guarantee
///
/// The legacy Turkish spellings are accepted as input aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterType {
    /// Performance/bid guarantee
    #[serde(alias = "teminat")]
    Standard,
    /// Advance payment guarantee
    #[serde(alias = "avans")]
    Advance,
    /// Final (definitive) guarantee
    #[serde(alias = "kesin-teminat")]
    Final,
    /// Temporary (provisional) guarantee
    #[serde(alias = "gecici-teminat")]
    Temporary,
}

impl LetterType {
    pub const ALL: [LetterType; 4] = [
        LetterType::Standard,
        LetterType::Advance,
        LetterType::Final,
        LetterType::Temporary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterType::Standard => "standard",
            LetterType::Advance => "advance",
            LetterType::Final => "final",
            LetterType::Temporary => "temporary",
        }
    }
}

impl fmt::Display for LetterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterType {
    type Err = GuaranteeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "teminat" => Ok(LetterType::Standard),
            "advance" | "avans" => Ok(LetterType::Advance),
            "final" | "kesin-teminat" => Ok(LetterType::Final),
            "temporary" | "gecici-teminat" => Ok(LetterType::Temporary),
            _ => Err(GuaranteeError::UnknownVariant {
                kind: "letterType",
                value: s.to_string(),
            }),
        }
    }
}

/// Lifecycle status of a letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    /// In force; the only status counted as overdue once expired
    #[default]
    #[serde(alias = "aktif")]
    Active,
    #[serde(alias = "beklemede")]
    Pending,
    /// Returned to the bank
    #[serde(alias = "kapali")]
    Closed,
    #[serde(alias = "iptal")]
    Cancelled,
}

impl LetterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterStatus::Active => "active",
            LetterStatus::Pending => "pending",
            LetterStatus::Closed => "closed",
            LetterStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LetterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterStatus {
    type Err = GuaranteeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" | "aktif" => Ok(LetterStatus::Active),
            "pending" | "beklemede" => Ok(LetterStatus::Pending),
            "closed" | "kapali" => Ok(LetterStatus::Closed),
            "cancelled" | "iptal" => Ok(LetterStatus::Cancelled),
            _ => Err(GuaranteeError::UnknownVariant {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// A stored guarantee letter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteeLetter {
    /// Unique identifier
    pub id: LetterId,
    /// Issuing bank; may point at a bank deleted since
    pub bank_id: BankId,
    /// Project the letter backs; may point at a project deleted since
    pub project_id: ProjectId,
    /// Kind of guarantee
    pub letter_type: LetterType,
    /// Value of the underlying contract
    pub contract_amount: Decimal,
    /// Share of the contract covered, in percent
    pub letter_percentage: Decimal,
    /// Guaranteed amount
    pub letter_amount: Decimal,
    /// Bank commission, in percent of the letter amount
    pub commission_rate: Decimal,
    /// Fixed BSMV tax and other costs added on top of the commission
    pub bsmv_and_other_costs: Decimal,
    /// Currency of every amount on the letter
    pub currency: CurrencyCode,
    /// Date the letter was bought from the bank
    pub purchase_date: NaiveDate,
    /// Date printed on the letter
    pub letter_date: NaiveDate,
    /// Open-ended letters have no expiry
    pub expiry_date: Option<NaiveDate>,
    /// Lifecycle status
    pub status: LetterStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A letter joined with its bank and project
pub type LetterRecord = Related<GuaranteeLetter>;

impl GuaranteeLetter {
    /// Commission owed for this letter, independent of payments
    pub fn total_commission(&self) -> Decimal {
        total_commission(self.letter_amount, self.commission_rate, self.bsmv_and_other_costs)
    }

    /// The amount implied by the contract and percentage
    pub fn nominal_letter_amount(&self) -> Decimal {
        percent_of(self.contract_amount, self.letter_percentage)
    }

    pub fn is_active(&self) -> bool {
        self.status == LetterStatus::Active
    }
}

impl Entity for GuaranteeLetter {
    const NAME: &'static str = "GuaranteeLetter";

    type Id = LetterId;
    type Record = LetterRecord;
    type New = NewGuaranteeLetter;
    type Patch = GuaranteeLetterPatch;
}

/// A create payload with defaults already applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewGuaranteeLetter {
    pub bank_id: BankId,
    pub project_id: ProjectId,
    pub letter_type: LetterType,
    pub contract_amount: Decimal,
    pub letter_percentage: Decimal,
    pub letter_amount: Decimal,
    pub commission_rate: Decimal,
    pub bsmv_and_other_costs: Decimal,
    pub currency: CurrencyCode,
    pub purchase_date: NaiveDate,
    pub letter_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub status: LetterStatus,
    pub notes: Option<String>,
}

impl NewGuaranteeLetter {
    /// Rejects negative amounts and rates
    pub fn validate(&self) -> Result<(), GuaranteeError> {
        non_negative("contractAmount", self.contract_amount)?;
        non_negative("letterPercentage", self.letter_percentage)?;
        non_negative("letterAmount", self.letter_amount)?;
        non_negative("commissionRate", self.commission_rate)?;
        non_negative("bsmvAndOtherCosts", self.bsmv_and_other_costs)?;
        Ok(())
    }
}

/// Fields to change on an existing letter
///
/// `expiry_date` and `notes` are nullable: `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuaranteeLetterPatch {
    pub bank_id: Option<BankId>,
    pub project_id: Option<ProjectId>,
    pub letter_type: Option<LetterType>,
    pub contract_amount: Option<Decimal>,
    pub letter_percentage: Option<Decimal>,
    pub letter_amount: Option<Decimal>,
    pub commission_rate: Option<Decimal>,
    pub bsmv_and_other_costs: Option<Decimal>,
    pub currency: Option<CurrencyCode>,
    pub purchase_date: Option<NaiveDate>,
    pub letter_date: Option<NaiveDate>,
    pub expiry_date: Option<Option<NaiveDate>>,
    pub status: Option<LetterStatus>,
    pub notes: Option<Option<String>>,
}

impl GuaranteeLetterPatch {
    /// Rejects negative amounts and rates among the provided fields
    pub fn validate(&self) -> Result<(), GuaranteeError> {
        let amounts = [
            ("contractAmount", self.contract_amount),
            ("letterPercentage", self.letter_percentage),
            ("letterAmount", self.letter_amount),
            ("commissionRate", self.commission_rate),
            ("bsmvAndOtherCosts", self.bsmv_and_other_costs),
        ];
        for (field, value) in amounts {
            if let Some(value) = value {
                non_negative(field, value)?;
            }
        }
        Ok(())
    }
}

pub(crate) fn non_negative(field: &'static str, value: Decimal) -> Result<(), GuaranteeError> {
    if value < Decimal::ZERO {
        return Err(GuaranteeError::NegativeAmount {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_type_alias_deserializes() {
        let t: LetterType = serde_json::from_str("\"kesin-teminat\"").unwrap();
        assert_eq!(t, LetterType::Final);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"final\"");
    }

    #[test]
    fn test_status_defaults_to_active() {
        assert_eq!(LetterStatus::default(), LetterStatus::Active);
        assert_eq!("iptal".parse::<LetterStatus>().unwrap(), LetterStatus::Cancelled);
    }

    #[test]
    fn test_unknown_type_names_field() {
        let err = "surety".parse::<LetterType>().unwrap_err();
        assert_eq!(err.field(), "letterType");
    }
}
