//! Guarantee letter repository implementation
//!
//! Letters are always read joined with their bank and project. Writes go
//! through a CTE so the stored row comes back joined in the same statement.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{BankId, LetterId, ListFilter, PortError, ProjectId, Repository};
use domain_directory::Related;
use domain_guarantee::{
    GuaranteeLetter, GuaranteeLetterPatch, LetterRecord, LetterStatus, LetterType,
    NewGuaranteeLetter,
};

use crate::error::DatabaseError;
use crate::repositories::relations::{
    ensure_references, JoinedBank, JoinedProject, BANK_COLUMNS, PROJECT_COLUMNS,
};
use crate::repositories::{push_relation_filters, push_set_opt, stored_code};

const INSERT_COLUMNS: &str = "id, bank_id, project_id, letter_type, contract_amount, \
    letter_percentage, letter_amount, commission_rate, bsmv_and_other_costs, currency, \
    purchase_date, letter_date, expiry_date, status, notes, created_at, updated_at";

/// Selects from a relation named `gl` holding letter rows
fn select_joined() -> String {
    format!(
        "SELECT gl.id, gl.bank_id, gl.project_id, gl.letter_type, gl.contract_amount, \
         gl.letter_percentage, gl.letter_amount, gl.commission_rate, gl.bsmv_and_other_costs, \
         gl.currency, gl.purchase_date, gl.letter_date, gl.expiry_date, gl.status, gl.notes, \
         gl.created_at, gl.updated_at, {BANK_COLUMNS}, {PROJECT_COLUMNS} \
         FROM gl \
         LEFT JOIN banks b ON b.id = gl.bank_id \
         LEFT JOIN projects p ON p.id = gl.project_id"
    )
}

/// PostgreSQL storage for guarantee letters
#[derive(Debug, Clone)]
pub struct PgGuaranteeLetterRepository {
    pool: PgPool,
}

impl PgGuaranteeLetterRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Letter type as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "letter_type", rename_all = "lowercase")]
pub enum DbLetterType {
    Standard,
    Advance,
    Final,
    Temporary,
}

impl From<LetterType> for DbLetterType {
    fn from(value: LetterType) -> Self {
        match value {
            LetterType::Standard => DbLetterType::Standard,
            LetterType::Advance => DbLetterType::Advance,
            LetterType::Final => DbLetterType::Final,
            LetterType::Temporary => DbLetterType::Temporary,
        }
    }
}

impl From<DbLetterType> for LetterType {
    fn from(value: DbLetterType) -> Self {
        match value {
            DbLetterType::Standard => LetterType::Standard,
            DbLetterType::Advance => LetterType::Advance,
            DbLetterType::Final => LetterType::Final,
            DbLetterType::Temporary => LetterType::Temporary,
        }
    }
}

/// Letter status as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "letter_status", rename_all = "lowercase")]
pub enum DbLetterStatus {
    Active,
    Pending,
    Closed,
    Cancelled,
}

impl From<LetterStatus> for DbLetterStatus {
    fn from(value: LetterStatus) -> Self {
        match value {
            LetterStatus::Active => DbLetterStatus::Active,
            LetterStatus::Pending => DbLetterStatus::Pending,
            LetterStatus::Closed => DbLetterStatus::Closed,
            LetterStatus::Cancelled => DbLetterStatus::Cancelled,
        }
    }
}

impl From<DbLetterStatus> for LetterStatus {
    fn from(value: DbLetterStatus) -> Self {
        match value {
            DbLetterStatus::Active => LetterStatus::Active,
            DbLetterStatus::Pending => LetterStatus::Pending,
            DbLetterStatus::Closed => LetterStatus::Closed,
            DbLetterStatus::Cancelled => LetterStatus::Cancelled,
        }
    }
}

/// Database row for a letter with its joined bank and project
#[derive(Debug, Clone, FromRow)]
pub struct LetterRow {
    pub id: Uuid,
    pub bank_id: Uuid,
    pub project_id: Uuid,
    pub letter_type: DbLetterType,
    pub contract_amount: Decimal,
    pub letter_percentage: Decimal,
    pub letter_amount: Decimal,
    pub commission_rate: Decimal,
    pub bsmv_and_other_costs: Decimal,
    pub currency: String,
    pub purchase_date: NaiveDate,
    pub letter_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub status: DbLetterStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    bank: JoinedBank,
    #[sqlx(flatten)]
    project: JoinedProject,
}

impl TryFrom<LetterRow> for LetterRecord {
    type Error = DatabaseError;

    fn try_from(row: LetterRow) -> Result<Self, Self::Error> {
        let letter = GuaranteeLetter {
            id: LetterId::from_uuid(row.id),
            bank_id: BankId::from_uuid(row.bank_id),
            project_id: ProjectId::from_uuid(row.project_id),
            letter_type: row.letter_type.into(),
            contract_amount: row.contract_amount,
            letter_percentage: row.letter_percentage,
            letter_amount: row.letter_amount,
            commission_rate: row.commission_rate,
            bsmv_and_other_costs: row.bsmv_and_other_costs,
            currency: stored_code(row.currency)?,
            purchase_date: row.purchase_date,
            letter_date: row.letter_date,
            expiry_date: row.expiry_date,
            status: row.status.into(),
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        Ok(Related::new(letter, row.bank.into_bank(), row.project.into_project()))
    }
}

fn into_records(rows: Vec<LetterRow>) -> Result<Vec<LetterRecord>, PortError> {
    rows.into_iter()
        .map(|row| LetterRecord::try_from(row).map_err(PortError::from))
        .collect()
}

#[async_trait]
impl Repository<GuaranteeLetter> for PgGuaranteeLetterRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: &ListFilter) -> Result<Vec<LetterRecord>, PortError> {
        debug!("Listing guarantee letters");
        let mut qb = QueryBuilder::<Postgres>::new("WITH gl AS (SELECT * FROM guarantee_letters");
        push_relation_filters(&mut qb, filter, "project_id", "bank_id");
        qb.push(") ").push(select_joined()).push(" ORDER BY gl.created_at DESC");

        let rows = qb
            .build_query_as::<LetterRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        into_records(rows)
    }

    #[instrument(skip(self), fields(letter_id = %id))]
    async fn get(&self, id: LetterId) -> Result<LetterRecord, PortError> {
        debug!("Fetching guarantee letter");
        let sql = format!(
            "WITH gl AS (SELECT * FROM guarantee_letters WHERE id = $1) {}",
            select_joined()
        );
        let row = sqlx::query_as::<_, LetterRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("GuaranteeLetter", id))?;
        Ok(LetterRecord::try_from(row)?)
    }

    #[instrument(skip(self, new), fields(bank_id = %new.bank_id, project_id = %new.project_id))]
    async fn create(&self, new: NewGuaranteeLetter) -> Result<LetterRecord, PortError> {
        ensure_references(&self.pool, Some(new.bank_id), Some(new.project_id)).await?;

        let id = LetterId::new();
        let now = Utc::now();
        debug!(letter_id = %id, "Creating guarantee letter");

        let sql = format!(
            "WITH gl AS (INSERT INTO guarantee_letters ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $16) \
             RETURNING *) {}",
            select_joined()
        );
        let row = sqlx::query_as::<_, LetterRow>(&sql)
            .bind(Uuid::from(id))
            .bind(Uuid::from(new.bank_id))
            .bind(Uuid::from(new.project_id))
            .bind(DbLetterType::from(new.letter_type))
            .bind(new.contract_amount)
            .bind(new.letter_percentage)
            .bind(new.letter_amount)
            .bind(new.commission_rate)
            .bind(new.bsmv_and_other_costs)
            .bind(String::from(new.currency))
            .bind(new.purchase_date)
            .bind(new.letter_date)
            .bind(new.expiry_date)
            .bind(DbLetterStatus::from(new.status))
            .bind(new.notes)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(LetterRecord::try_from(row)?)
    }

    #[instrument(skip(self, patch), fields(letter_id = %id))]
    async fn update(
        &self,
        id: LetterId,
        patch: GuaranteeLetterPatch,
    ) -> Result<LetterRecord, PortError> {
        ensure_references(&self.pool, patch.bank_id, patch.project_id).await?;
        debug!("Updating guarantee letter");

        let mut qb =
            QueryBuilder::<Postgres>::new("WITH gl AS (UPDATE guarantee_letters SET updated_at = ");
        qb.push_bind(Utc::now());
        push_set_opt(&mut qb, "bank_id", patch.bank_id.map(Uuid::from));
        push_set_opt(&mut qb, "project_id", patch.project_id.map(Uuid::from));
        push_set_opt(&mut qb, "letter_type", patch.letter_type.map(DbLetterType::from));
        push_set_opt(&mut qb, "contract_amount", patch.contract_amount);
        push_set_opt(&mut qb, "letter_percentage", patch.letter_percentage);
        push_set_opt(&mut qb, "letter_amount", patch.letter_amount);
        push_set_opt(&mut qb, "commission_rate", patch.commission_rate);
        push_set_opt(&mut qb, "bsmv_and_other_costs", patch.bsmv_and_other_costs);
        push_set_opt(&mut qb, "currency", patch.currency.map(String::from));
        push_set_opt(&mut qb, "purchase_date", patch.purchase_date);
        push_set_opt(&mut qb, "letter_date", patch.letter_date);
        push_set_opt(&mut qb, "expiry_date", patch.expiry_date);
        push_set_opt(&mut qb, "status", patch.status.map(DbLetterStatus::from));
        push_set_opt(&mut qb, "notes", patch.notes);
        qb.push(" WHERE id = ").push_bind(Uuid::from(id));
        qb.push(" RETURNING *) ").push(select_joined());

        let row = qb
            .build_query_as::<LetterRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("GuaranteeLetter", id))?;
        Ok(LetterRecord::try_from(row)?)
    }

    /// Payments of the letter go with it
    #[instrument(skip(self), fields(letter_id = %id))]
    async fn delete(&self, id: LetterId) -> Result<(), PortError> {
        debug!("Deleting guarantee letter");
        let result = sqlx::query("DELETE FROM guarantee_letters WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("GuaranteeLetter", id).into());
        }
        Ok(())
    }
}
