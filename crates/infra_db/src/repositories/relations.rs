//! Left-joined bank and project columns for letters and credits
//!
//! The joined columns are aliased `bank__*` / `project__*` so they can sit in
//! the same row as the letter or credit itself. A missing join target shows
//! up as all-NULL columns.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{BankId, ProjectId};
use domain_directory::{Bank, Project};

use crate::error::DatabaseError;
use crate::repositories::row_exists;

/// Select list for the joined bank, expects the bank table aliased `b`
pub(crate) const BANK_COLUMNS: &str = "\
    b.id AS bank__id, b.name AS bank__name, b.code AS bank__code, \
    b.branch_name AS bank__branch_name, b.contact_person AS bank__contact_person, \
    b.phone AS bank__phone, b.email AS bank__email, b.address AS bank__address, \
    b.status AS bank__status, b.created_at AS bank__created_at, \
    b.updated_at AS bank__updated_at";

/// Select list for the joined project, expects the project table aliased `p`
pub(crate) const PROJECT_COLUMNS: &str = "\
    p.id AS project__id, p.name AS project__name, \
    p.description AS project__description, p.status AS project__status, \
    p.created_at AS project__created_at, p.updated_at AS project__updated_at";

#[derive(Debug, Clone, FromRow)]
pub(crate) struct JoinedBank {
    #[sqlx(rename = "bank__id")]
    id: Option<Uuid>,
    #[sqlx(rename = "bank__name")]
    name: Option<String>,
    #[sqlx(rename = "bank__code")]
    code: Option<String>,
    #[sqlx(rename = "bank__branch_name")]
    branch_name: Option<String>,
    #[sqlx(rename = "bank__contact_person")]
    contact_person: Option<String>,
    #[sqlx(rename = "bank__phone")]
    phone: Option<String>,
    #[sqlx(rename = "bank__email")]
    email: Option<String>,
    #[sqlx(rename = "bank__address")]
    address: Option<String>,
    #[sqlx(rename = "bank__status")]
    status: Option<String>,
    #[sqlx(rename = "bank__created_at")]
    created_at: Option<DateTime<Utc>>,
    #[sqlx(rename = "bank__updated_at")]
    updated_at: Option<DateTime<Utc>>,
}

impl JoinedBank {
    /// The bank, or `None` when the join found nothing
    pub(crate) fn into_bank(self) -> Option<Bank> {
        Some(Bank {
            id: BankId::from_uuid(self.id?),
            name: self.name?,
            code: self.code,
            branch_name: self.branch_name,
            contact_person: self.contact_person,
            phone: self.phone,
            email: self.email,
            address: self.address,
            status: self.status?,
            created_at: self.created_at?,
            updated_at: self.updated_at?,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct JoinedProject {
    #[sqlx(rename = "project__id")]
    id: Option<Uuid>,
    #[sqlx(rename = "project__name")]
    name: Option<String>,
    #[sqlx(rename = "project__description")]
    description: Option<String>,
    #[sqlx(rename = "project__status")]
    status: Option<String>,
    #[sqlx(rename = "project__created_at")]
    created_at: Option<DateTime<Utc>>,
    #[sqlx(rename = "project__updated_at")]
    updated_at: Option<DateTime<Utc>>,
}

impl JoinedProject {
    /// The project, or `None` when the join found nothing
    pub(crate) fn into_project(self) -> Option<Project> {
        Some(Project {
            id: ProjectId::from_uuid(self.id?),
            name: self.name?,
            description: self.description,
            status: self.status?,
            created_at: self.created_at?,
            updated_at: self.updated_at?,
        })
    }
}

/// Checks that the bank and project a write points at exist
///
/// `None` skips the check, for patches that leave the reference alone.
pub(crate) async fn ensure_references(
    pool: &PgPool,
    bank_id: Option<BankId>,
    project_id: Option<ProjectId>,
) -> Result<(), DatabaseError> {
    if let Some(bank_id) = bank_id {
        if !row_exists(pool, "banks", bank_id.into()).await? {
            return Err(DatabaseError::missing_reference("bankId", "Bank", bank_id));
        }
    }
    if let Some(project_id) = project_id {
        if !row_exists(pool, "projects", project_id.into()).await? {
            return Err(DatabaseError::missing_reference("projectId", "Project", project_id));
        }
    }
    Ok(())
}
