//! Banks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BankId, Entity};

use crate::error::DirectoryError;
use crate::{required_text, DEFAULT_STATUS};

/// An issuing bank (or one of its branches)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub id: BankId,
    pub name: String,
    pub code: Option<String>,
    pub branch_name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional contact details shared by create and patch payloads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankContact {
    pub code: Option<String>,
    pub branch_name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// A validated create payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewBank {
    pub name: String,
    pub contact: BankContact,
    pub status: String,
}

impl NewBank {
    /// Creates a bank payload with the default status
    pub fn new(name: impl Into<String>) -> Result<Self, DirectoryError> {
        Ok(Self {
            name: required_text(name, "name")?,
            contact: BankContact::default(),
            status: DEFAULT_STATUS.to_string(),
        })
    }

    /// Sets the contact details
    pub fn with_contact(mut self, contact: BankContact) -> Self {
        self.contact = contact;
        self
    }

    /// Overrides the default status; `None` keeps the default
    pub fn with_status(mut self, status: Option<String>) -> Result<Self, DirectoryError> {
        if let Some(status) = status {
            self.status = required_text(status, "status")?;
        }
        Ok(self)
    }
}

/// Fields to change on an existing bank
///
/// Each nullable detail is `Some(None)` to clear it and `None` to leave it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankPatch {
    pub name: Option<String>,
    pub code: Option<Option<String>>,
    pub branch_name: Option<Option<String>>,
    pub contact_person: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub status: Option<String>,
}

impl Entity for Bank {
    const NAME: &'static str = "Bank";

    type Id = BankId;
    type Record = Bank;
    type New = NewBank;
    type Patch = BankPatch;
}
