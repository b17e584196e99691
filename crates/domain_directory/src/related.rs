//! Records returned together with the bank and project they point at

use serde::{Deserialize, Serialize};

use crate::bank::Bank;
use crate::project::Project;

/// A letter or credit joined with its bank and project
///
/// The relation is `None` when the bank or project has been deleted since
/// the record was written. The inner record's fields are flattened so the
/// JSON shape is the record plus `bank` and `project` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Related<T> {
    #[serde(flatten)]
    pub record: T,
    pub bank: Option<Bank>,
    pub project: Option<Project>,
}

impl<T> Related<T> {
    pub fn new(record: T, bank: Option<Bank>, project: Option<Project>) -> Self {
        Self { record, bank, project }
    }

    /// A record whose relations were not loaded or no longer exist
    pub fn detached(record: T) -> Self {
        Self::new(record, None, None)
    }

    /// Name of the joined bank, if it still exists
    pub fn bank_name(&self) -> Option<&str> {
        self.bank.as_ref().map(|b| b.name.as_str())
    }
}

impl<T> std::ops::Deref for Related<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}
