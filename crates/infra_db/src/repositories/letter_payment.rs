//! Letter payment repository implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{LetterId, LetterPaymentId, ListFilter, PortError, Repository};
use domain_guarantee::{LetterPayment, LetterPaymentPatch, NewLetterPayment};

use crate::error::DatabaseError;
use crate::repositories::{push_set_opt, row_exists};

const COLUMNS: &str = "id, letter_id, payment_date, amount, bsmv, receipt_no, description, \
                       created_at, updated_at";

/// PostgreSQL storage for commission payments
#[derive(Debug, Clone)]
pub struct PgLetterPaymentRepository {
    pool: PgPool,
}

impl PgLetterPaymentRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_letter(&self, letter_id: LetterId) -> Result<(), DatabaseError> {
        if !row_exists(&self.pool, "guarantee_letters", letter_id.into()).await? {
            return Err(DatabaseError::missing_reference(
                "letterId",
                "GuaranteeLetter",
                letter_id,
            ));
        }
        Ok(())
    }
}

/// Database row for a payment
#[derive(Debug, Clone, FromRow)]
pub struct LetterPaymentRow {
    pub id: Uuid,
    pub letter_id: Uuid,
    pub payment_date: NaiveDate,
    pub amount: Decimal,
    pub bsmv: Decimal,
    pub receipt_no: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LetterPaymentRow> for LetterPayment {
    fn from(row: LetterPaymentRow) -> Self {
        LetterPayment {
            id: LetterPaymentId::from_uuid(row.id),
            letter_id: LetterId::from_uuid(row.letter_id),
            payment_date: row.payment_date,
            amount: row.amount,
            bsmv: row.bsmv,
            receipt_no: row.receipt_no,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl Repository<LetterPayment> for PgLetterPaymentRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: &ListFilter) -> Result<Vec<LetterPayment>, PortError> {
        debug!("Listing letter payments");
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        qb.push(COLUMNS).push(" FROM letter_payments");
        if let Some(letter_id) = filter.letter_id {
            qb.push(" WHERE letter_id = ").push_bind(Uuid::from(letter_id));
        }
        qb.push(" ORDER BY created_at DESC");

        let rows = qb
            .build_query_as::<LetterPaymentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(LetterPayment::from).collect())
    }

    #[instrument(skip(self), fields(payment_id = %id))]
    async fn get(&self, id: LetterPaymentId) -> Result<LetterPayment, PortError> {
        debug!("Fetching letter payment");
        let sql = format!("SELECT {COLUMNS} FROM letter_payments WHERE id = $1");
        let row = sqlx::query_as::<_, LetterPaymentRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("LetterPayment", id))?;
        Ok(row.into())
    }

    #[instrument(skip(self, new), fields(letter_id = %new.letter_id, amount = %new.amount))]
    async fn create(&self, new: NewLetterPayment) -> Result<LetterPayment, PortError> {
        self.ensure_letter(new.letter_id).await?;

        let id = LetterPaymentId::new();
        let now = Utc::now();
        debug!(payment_id = %id, "Creating letter payment");

        let sql = format!(
            "INSERT INTO letter_payments ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, LetterPaymentRow>(&sql)
            .bind(Uuid::from(id))
            .bind(Uuid::from(new.letter_id))
            .bind(new.payment_date)
            .bind(new.amount)
            .bind(new.bsmv)
            .bind(new.receipt_no)
            .bind(new.description)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(row.into())
    }

    #[instrument(skip(self, patch), fields(payment_id = %id))]
    async fn update(
        &self,
        id: LetterPaymentId,
        patch: LetterPaymentPatch,
    ) -> Result<LetterPayment, PortError> {
        if let Some(letter_id) = patch.letter_id {
            self.ensure_letter(letter_id).await?;
        }
        debug!("Updating letter payment");

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE letter_payments SET updated_at = ");
        qb.push_bind(Utc::now());
        push_set_opt(&mut qb, "letter_id", patch.letter_id.map(Uuid::from));
        push_set_opt(&mut qb, "payment_date", patch.payment_date);
        push_set_opt(&mut qb, "amount", patch.amount);
        push_set_opt(&mut qb, "bsmv", patch.bsmv);
        push_set_opt(&mut qb, "receipt_no", patch.receipt_no);
        push_set_opt(&mut qb, "description", patch.description);
        qb.push(" WHERE id = ").push_bind(Uuid::from(id));
        qb.push(" RETURNING ").push(COLUMNS);

        let row = qb
            .build_query_as::<LetterPaymentRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("LetterPayment", id))?;
        Ok(row.into())
    }

    #[instrument(skip(self), fields(payment_id = %id))]
    async fn delete(&self, id: LetterPaymentId) -> Result<(), PortError> {
        debug!("Deleting letter payment");
        let result = sqlx::query("DELETE FROM letter_payments WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("LetterPayment", id).into());
        }
        Ok(())
    }
}
