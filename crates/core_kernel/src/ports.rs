//! Repository port shared by every stored entity
//!
//! Each record type (project, bank, currency, exchange rate, guarantee
//! letter, credit, letter payment) is described by an [`Entity`] and stored
//! behind the same [`Repository`] contract. The HTTP layer is written once
//! against this contract; the PostgreSQL implementations live in `infra_db`.
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────────┐
//! │  interface_api       │ ───▶ │  Repository<E: Entity>   │
//! │  (generic handlers)  │      │  list/get/create/update/ │
//! └──────────────────────┘      │  delete                  │
//!                               └────────────▲─────────────┘
//!                                            │
//!                               ┌────────────┴─────────────┐
//!                               │  infra_db Pg*Repository  │
//!                               └──────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::MoneyError;
use crate::identifiers::{BankId, LetterId, ProjectId};

/// Error type for port operations
///
/// Every repository implementation reports failures through this type so the
/// HTTP layer can map them uniformly: `NotFound` to 404, `Validation` to 400,
/// everything else to 500.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Validation error with field information
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Returns true if this error is a caller mistake rather than a system fault
    pub fn is_validation(&self) -> bool {
        matches!(self, PortError::Validation { .. })
    }
}

impl From<MoneyError> for PortError {
    fn from(err: MoneyError) -> Self {
        let field = match &err {
            MoneyError::InvalidCurrency(_) => Some("currency".to_string()),
            _ => None,
        };
        PortError::Validation {
            message: err.to_string(),
            field,
        }
    }
}

/// Describes one stored record type
///
/// `Record` is what reads and writes return (for letters and credits this is
/// the row joined with its bank and project), `New` is a fully validated
/// create payload and `Patch` carries only the fields to change.
pub trait Entity: Send + Sync + 'static {
    /// Human readable name used in errors and logs
    const NAME: &'static str;

    type Id: Copy + fmt::Display + FromStr + Send + Sync + 'static;
    type Record: Clone + Serialize + Send + Sync + 'static;
    type New: Send + Sync + 'static;
    type Patch: Send + Sync + 'static;
}

/// Foreign-key filters accepted by `Repository::list`
///
/// Entities ignore the filters that do not apply to them. When several
/// filters are set they are combined (all must match).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    pub project_id: Option<ProjectId>,
    pub bank_id: Option<BankId>,
    pub letter_id: Option<LetterId>,
}

impl ListFilter {
    /// Lists everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to records of one project
    pub fn by_project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
            ..Default::default()
        }
    }

    /// Restricts to records of one bank
    pub fn by_bank(bank_id: BankId) -> Self {
        Self {
            bank_id: Some(bank_id),
            ..Default::default()
        }
    }

    /// Restricts to payments of one letter
    pub fn by_letter(letter_id: LetterId) -> Self {
        Self {
            letter_id: Some(letter_id),
            ..Default::default()
        }
    }

    /// Returns true when no filter is set
    pub fn is_empty(&self) -> bool {
        self.project_id.is_none() && self.bank_id.is_none() && self.letter_id.is_none()
    }
}

/// The uniform CRUD contract over one entity type
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Lists records, newest first, narrowed by `filter`
    async fn list(&self, filter: &ListFilter) -> Result<Vec<E::Record>, PortError>;

    /// Fetches one record or `PortError::NotFound`
    async fn get(&self, id: E::Id) -> Result<E::Record, PortError>;

    /// Persists a new record, generating its id and timestamps
    async fn create(&self, new: E::New) -> Result<E::Record, PortError>;

    /// Applies the provided fields and stamps the update time
    async fn update(&self, id: E::Id, patch: E::Patch) -> Result<E::Record, PortError>;

    /// Removes the record or returns `PortError::NotFound`
    async fn delete(&self, id: E::Id) -> Result<(), PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity() {
        let id = ProjectId::new();
        let err = PortError::not_found("Project", id);
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Project"));
        assert!(err.to_string().contains("PRJ-"));
    }

    #[test]
    fn test_filter_constructors() {
        let bank_id = BankId::new();
        let filter = ListFilter::by_bank(bank_id);
        assert_eq!(filter.bank_id, Some(bank_id));
        assert!(filter.project_id.is_none());
        assert!(!filter.is_empty());
        assert!(ListFilter::all().is_empty());
    }

    #[test]
    fn test_bad_currency_maps_to_currency_field() {
        let err: PortError = MoneyError::InvalidCurrency("$$".to_string()).into();
        match err {
            PortError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("currency")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
