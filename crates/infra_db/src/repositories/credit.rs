//! Credit repository implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{BankId, CreditId, ListFilter, PortError, ProjectId, Repository};
use domain_credit::{Credit, CreditPatch, CreditRecord, CreditStatus, NewCredit};
use domain_directory::Related;

use crate::error::DatabaseError;
use crate::repositories::relations::{
    ensure_references, JoinedBank, JoinedProject, BANK_COLUMNS, PROJECT_COLUMNS,
};
use crate::repositories::{push_relation_filters, push_set_opt, stored_code};

const INSERT_COLUMNS: &str = "id, bank_id, project_id, principal_amount, interest_amount, \
    total_repaid_amount, currency, credit_date, maturity_date, status, notes, created_at, \
    updated_at";

/// Selects from a relation named `cr` holding credit rows
fn select_joined() -> String {
    format!(
        "SELECT cr.id, cr.bank_id, cr.project_id, cr.principal_amount, cr.interest_amount, \
         cr.total_repaid_amount, cr.currency, cr.credit_date, cr.maturity_date, cr.status, \
         cr.notes, cr.created_at, cr.updated_at, {BANK_COLUMNS}, {PROJECT_COLUMNS} \
         FROM cr \
         LEFT JOIN banks b ON b.id = cr.bank_id \
         LEFT JOIN projects p ON p.id = cr.project_id"
    )
}

/// PostgreSQL storage for credits
#[derive(Debug, Clone)]
pub struct PgCreditRepository {
    pool: PgPool,
}

impl PgCreditRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Credit status as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "credit_status", rename_all = "lowercase")]
pub enum DbCreditStatus {
    Ongoing,
    Closed,
    Cancelled,
}

impl From<CreditStatus> for DbCreditStatus {
    fn from(value: CreditStatus) -> Self {
        match value {
            CreditStatus::Ongoing => DbCreditStatus::Ongoing,
            CreditStatus::Closed => DbCreditStatus::Closed,
            CreditStatus::Cancelled => DbCreditStatus::Cancelled,
        }
    }
}

impl From<DbCreditStatus> for CreditStatus {
    fn from(value: DbCreditStatus) -> Self {
        match value {
            DbCreditStatus::Ongoing => CreditStatus::Ongoing,
            DbCreditStatus::Closed => CreditStatus::Closed,
            DbCreditStatus::Cancelled => CreditStatus::Cancelled,
        }
    }
}

/// Database row for a credit with its joined bank and project
#[derive(Debug, Clone, FromRow)]
pub struct CreditRow {
    pub id: Uuid,
    pub bank_id: Uuid,
    pub project_id: Uuid,
    pub principal_amount: Decimal,
    pub interest_amount: Decimal,
    pub total_repaid_amount: Decimal,
    pub currency: String,
    pub credit_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub status: DbCreditStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    bank: JoinedBank,
    #[sqlx(flatten)]
    project: JoinedProject,
}

impl TryFrom<CreditRow> for CreditRecord {
    type Error = DatabaseError;

    fn try_from(row: CreditRow) -> Result<Self, Self::Error> {
        let credit = Credit {
            id: CreditId::from_uuid(row.id),
            bank_id: BankId::from_uuid(row.bank_id),
            project_id: ProjectId::from_uuid(row.project_id),
            principal_amount: row.principal_amount,
            interest_amount: row.interest_amount,
            total_repaid_amount: row.total_repaid_amount,
            currency: stored_code(row.currency)?,
            credit_date: row.credit_date,
            maturity_date: row.maturity_date,
            status: row.status.into(),
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        Ok(Related::new(credit, row.bank.into_bank(), row.project.into_project()))
    }
}

#[async_trait]
impl Repository<Credit> for PgCreditRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: &ListFilter) -> Result<Vec<CreditRecord>, PortError> {
        debug!("Listing credits");
        let mut qb = QueryBuilder::<Postgres>::new("WITH cr AS (SELECT * FROM credits");
        push_relation_filters(&mut qb, filter, "project_id", "bank_id");
        qb.push(") ").push(select_joined()).push(" ORDER BY cr.created_at DESC");

        let rows = qb
            .build_query_as::<CreditRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        rows.into_iter()
            .map(|row| CreditRecord::try_from(row).map_err(PortError::from))
            .collect()
    }

    #[instrument(skip(self), fields(credit_id = %id))]
    async fn get(&self, id: CreditId) -> Result<CreditRecord, PortError> {
        debug!("Fetching credit");
        let sql = format!("WITH cr AS (SELECT * FROM credits WHERE id = $1) {}", select_joined());
        let row = sqlx::query_as::<_, CreditRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("Credit", id))?;
        Ok(CreditRecord::try_from(row)?)
    }

    #[instrument(skip(self, new), fields(bank_id = %new.bank_id, project_id = %new.project_id))]
    async fn create(&self, new: NewCredit) -> Result<CreditRecord, PortError> {
        ensure_references(&self.pool, Some(new.bank_id), Some(new.project_id)).await?;

        let id = CreditId::new();
        let now = Utc::now();
        debug!(credit_id = %id, "Creating credit");

        let sql = format!(
            "WITH cr AS (INSERT INTO credits ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12) \
             RETURNING *) {}",
            select_joined()
        );
        let row = sqlx::query_as::<_, CreditRow>(&sql)
            .bind(Uuid::from(id))
            .bind(Uuid::from(new.bank_id))
            .bind(Uuid::from(new.project_id))
            .bind(new.principal_amount)
            .bind(new.interest_amount)
            .bind(new.total_repaid_amount)
            .bind(String::from(new.currency))
            .bind(new.credit_date)
            .bind(new.maturity_date)
            .bind(DbCreditStatus::from(new.status))
            .bind(new.notes)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(CreditRecord::try_from(row)?)
    }

    #[instrument(skip(self, patch), fields(credit_id = %id))]
    async fn update(&self, id: CreditId, patch: CreditPatch) -> Result<CreditRecord, PortError> {
        ensure_references(&self.pool, patch.bank_id, patch.project_id).await?;
        debug!("Updating credit");

        let mut qb = QueryBuilder::<Postgres>::new("WITH cr AS (UPDATE credits SET updated_at = ");
        qb.push_bind(Utc::now());
        push_set_opt(&mut qb, "bank_id", patch.bank_id.map(Uuid::from));
        push_set_opt(&mut qb, "project_id", patch.project_id.map(Uuid::from));
        push_set_opt(&mut qb, "principal_amount", patch.principal_amount);
        push_set_opt(&mut qb, "interest_amount", patch.interest_amount);
        push_set_opt(&mut qb, "total_repaid_amount", patch.total_repaid_amount);
        push_set_opt(&mut qb, "currency", patch.currency.map(String::from));
        push_set_opt(&mut qb, "credit_date", patch.credit_date);
        push_set_opt(&mut qb, "maturity_date", patch.maturity_date);
        push_set_opt(&mut qb, "status", patch.status.map(DbCreditStatus::from));
        push_set_opt(&mut qb, "notes", patch.notes);
        qb.push(" WHERE id = ").push_bind(Uuid::from(id));
        qb.push(" RETURNING *) ").push(select_joined());

        let row = qb
            .build_query_as::<CreditRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("Credit", id))?;
        Ok(CreditRecord::try_from(row)?)
    }

    #[instrument(skip(self), fields(credit_id = %id))]
    async fn delete(&self, id: CreditId) -> Result<(), PortError> {
        debug!("Deleting credit");
        let result = sqlx::query("DELETE FROM credits WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Credit", id).into());
        }
        Ok(())
    }
}
