//! Currency repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{CurrencyId, ListFilter, PortError, Repository};
use domain_directory::{Currency, CurrencyPatch, NewCurrency};

use crate::error::DatabaseError;
use crate::repositories::{push_set_opt, stored_code};

const COLUMNS: &str = "id, code, name, symbol, is_active, created_at, updated_at";

/// PostgreSQL storage for currencies
#[derive(Debug, Clone)]
pub struct PgCurrencyRepository {
    pool: PgPool,
}

impl PgCurrencyRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for a currency
#[derive(Debug, Clone, FromRow)]
pub struct CurrencyRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub symbol: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CurrencyRow> for Currency {
    type Error = DatabaseError;

    fn try_from(row: CurrencyRow) -> Result<Self, Self::Error> {
        Ok(Currency {
            id: CurrencyId::from_uuid(row.id),
            code: stored_code(row.code)?,
            name: row.name,
            symbol: row.symbol,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl Repository<Currency> for PgCurrencyRepository {
    /// Only active currencies are listed, ordered by code
    #[instrument(skip(self))]
    async fn list(&self, _filter: &ListFilter) -> Result<Vec<Currency>, PortError> {
        debug!("Listing active currencies");
        let sql = format!("SELECT {COLUMNS} FROM currencies WHERE is_active ORDER BY code");
        let rows = sqlx::query_as::<_, CurrencyRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        rows.into_iter()
            .map(|row| Currency::try_from(row).map_err(PortError::from))
            .collect()
    }

    #[instrument(skip(self), fields(currency_id = %id))]
    async fn get(&self, id: CurrencyId) -> Result<Currency, PortError> {
        debug!("Fetching currency");
        let sql = format!("SELECT {COLUMNS} FROM currencies WHERE id = $1");
        let row = sqlx::query_as::<_, CurrencyRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("Currency", id))?;
        Ok(Currency::try_from(row)?)
    }

    #[instrument(skip(self, new), fields(code = %new.code))]
    async fn create(&self, new: NewCurrency) -> Result<Currency, PortError> {
        let id = CurrencyId::new();
        let now = Utc::now();
        debug!(currency_id = %id, "Creating currency");

        let sql = format!(
            "INSERT INTO currencies ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CurrencyRow>(&sql)
            .bind(Uuid::from(id))
            .bind(String::from(new.code))
            .bind(new.name)
            .bind(new.symbol)
            .bind(new.is_active)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(Currency::try_from(row)?)
    }

    #[instrument(skip(self, patch), fields(currency_id = %id))]
    async fn update(&self, id: CurrencyId, patch: CurrencyPatch) -> Result<Currency, PortError> {
        debug!("Updating currency");
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE currencies SET updated_at = ");
        qb.push_bind(Utc::now());
        push_set_opt(&mut qb, "code", patch.code.map(String::from));
        push_set_opt(&mut qb, "name", patch.name);
        push_set_opt(&mut qb, "symbol", patch.symbol);
        push_set_opt(&mut qb, "is_active", patch.is_active);
        qb.push(" WHERE id = ").push_bind(Uuid::from(id));
        qb.push(" RETURNING ").push(COLUMNS);

        let row = qb
            .build_query_as::<CurrencyRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("Currency", id))?;
        Ok(Currency::try_from(row)?)
    }

    #[instrument(skip(self), fields(currency_id = %id))]
    async fn delete(&self, id: CurrencyId) -> Result<(), PortError> {
        debug!("Deleting currency");
        let result = sqlx::query("DELETE FROM currencies WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Currency", id).into());
        }
        Ok(())
    }
}
