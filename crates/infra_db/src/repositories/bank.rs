//! Bank repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{BankId, ListFilter, PortError, Repository};
use domain_directory::{Bank, BankPatch, NewBank};

use crate::error::DatabaseError;
use crate::repositories::push_set_opt;

const COLUMNS: &str = "id, name, code, branch_name, contact_person, phone, email, address, \
                       status, created_at, updated_at";

/// PostgreSQL storage for banks
#[derive(Debug, Clone)]
pub struct PgBankRepository {
    pool: PgPool,
}

impl PgBankRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for a bank
#[derive(Debug, Clone, FromRow)]
pub struct BankRow {
    pub id: Uuid,
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

impl From<BankRow> for Bank {
    fn from(row: BankRow) -> Self {
        Bank {
            id: BankId::from_uuid(row.id),
            name: row.name,
            code: row.code,
            branch_name: row.branch_name,
            contact_person: row.contact_person,
            phone: row.phone,
            email: row.email,
            address: row.address,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl Repository<Bank> for PgBankRepository {
    #[instrument(skip(self))]
    async fn list(&self, _filter: &ListFilter) -> Result<Vec<Bank>, PortError> {
        debug!("Listing banks");
        let sql = format!("SELECT {COLUMNS} FROM banks ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, BankRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Bank::from).collect())
    }

    #[instrument(skip(self), fields(bank_id = %id))]
    async fn get(&self, id: BankId) -> Result<Bank, PortError> {
        debug!("Fetching bank");
        let sql = format!("SELECT {COLUMNS} FROM banks WHERE id = $1");
        let row = sqlx::query_as::<_, BankRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("Bank", id))?;
        Ok(row.into())
    }

    #[instrument(skip(self, new), fields(name = %new.name))]
    async fn create(&self, new: NewBank) -> Result<Bank, PortError> {
        let id = BankId::new();
        let now = Utc::now();
        debug!(bank_id = %id, "Creating bank");

        let sql = format!(
            "INSERT INTO banks ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) RETURNING {COLUMNS}"
        );
        let contact = new.contact;
        let row = sqlx::query_as::<_, BankRow>(&sql)
            .bind(Uuid::from(id))
            .bind(new.name)
            .bind(contact.code)
            .bind(contact.branch_name)
            .bind(contact.contact_person)
            .bind(contact.phone)
            .bind(contact.email)
            .bind(contact.address)
            .bind(new.status)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(row.into())
    }

    #[instrument(skip(self, patch), fields(bank_id = %id))]
    async fn update(&self, id: BankId, patch: BankPatch) -> Result<Bank, PortError> {
        debug!("Updating bank");
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE banks SET updated_at = ");
        qb.push_bind(Utc::now());
        push_set_opt(&mut qb, "name", patch.name);
        push_set_opt(&mut qb, "code", patch.code);
        push_set_opt(&mut qb, "branch_name", patch.branch_name);
        push_set_opt(&mut qb, "contact_person", patch.contact_person);
        push_set_opt(&mut qb, "phone", patch.phone);
        push_set_opt(&mut qb, "email", patch.email);
        push_set_opt(&mut qb, "address", patch.address);
        push_set_opt(&mut qb, "status", patch.status);
        qb.push(" WHERE id = ").push_bind(Uuid::from(id));
        qb.push(" RETURNING ").push(COLUMNS);

        let row = qb
            .build_query_as::<BankRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("Bank", id))?;
        Ok(row.into())
    }

    /// Letters and credits that point at the bank are left in place
    #[instrument(skip(self), fields(bank_id = %id))]
    async fn delete(&self, id: BankId) -> Result<(), PortError> {
        debug!("Deleting bank");
        let result = sqlx::query("DELETE FROM banks WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Bank", id).into());
        }
        Ok(())
    }
}
