//! Exchange-rate repository implementation
//!
//! Rates are keyed by their ordered currency pair. Creating a rate for a pair
//! that already exists replaces the stored rate in place.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{ExchangeRateId, ListFilter, PortError, Repository};
use domain_directory::{ExchangeRate, ExchangeRatePatch, NewExchangeRate};

use crate::error::DatabaseError;
use crate::repositories::{push_set_opt, stored_code};

const COLUMNS: &str = "id, from_currency, to_currency, rate, updated_at";

/// PostgreSQL storage for exchange rates
#[derive(Debug, Clone)]
pub struct PgExchangeRateRepository {
    pool: PgPool,
}

impl PgExchangeRateRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for an exchange rate
#[derive(Debug, Clone, FromRow)]
pub struct ExchangeRateRow {
    pub id: Uuid,
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ExchangeRateRow> for ExchangeRate {
    type Error = DatabaseError;

    fn try_from(row: ExchangeRateRow) -> Result<Self, Self::Error> {
        Ok(ExchangeRate {
            id: ExchangeRateId::from_uuid(row.id),
            from_currency: stored_code(row.from_currency)?,
            to_currency: stored_code(row.to_currency)?,
            rate: row.rate,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl Repository<ExchangeRate> for PgExchangeRateRepository {
    #[instrument(skip(self))]
    async fn list(&self, _filter: &ListFilter) -> Result<Vec<ExchangeRate>, PortError> {
        debug!("Listing exchange rates");
        let sql = format!("SELECT {COLUMNS} FROM exchange_rates ORDER BY updated_at DESC");
        let rows = sqlx::query_as::<_, ExchangeRateRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        rows.into_iter()
            .map(|row| ExchangeRate::try_from(row).map_err(PortError::from))
            .collect()
    }

    #[instrument(skip(self), fields(rate_id = %id))]
    async fn get(&self, id: ExchangeRateId) -> Result<ExchangeRate, PortError> {
        debug!("Fetching exchange rate");
        let sql = format!("SELECT {COLUMNS} FROM exchange_rates WHERE id = $1");
        let row = sqlx::query_as::<_, ExchangeRateRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("ExchangeRate", id))?;
        Ok(ExchangeRate::try_from(row)?)
    }

    /// Inserts the pair or replaces the rate of the stored pair
    #[instrument(
        skip(self, new),
        fields(from = %new.from_currency, to = %new.to_currency, rate = %new.rate)
    )]
    async fn create(&self, new: NewExchangeRate) -> Result<ExchangeRate, PortError> {
        debug!("Upserting exchange rate");
        let sql = format!(
            "INSERT INTO exchange_rates ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (from_currency, to_currency) \
             DO UPDATE SET rate = EXCLUDED.rate, updated_at = EXCLUDED.updated_at \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ExchangeRateRow>(&sql)
            .bind(Uuid::from(ExchangeRateId::new()))
            .bind(String::from(new.from_currency))
            .bind(String::from(new.to_currency))
            .bind(new.rate)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(ExchangeRate::try_from(row)?)
    }

    #[instrument(skip(self, patch), fields(rate_id = %id))]
    async fn update(
        &self,
        id: ExchangeRateId,
        patch: ExchangeRatePatch,
    ) -> Result<ExchangeRate, PortError> {
        debug!("Updating exchange rate");
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE exchange_rates SET updated_at = ");
        qb.push_bind(Utc::now());
        push_set_opt(&mut qb, "rate", patch.rate);
        qb.push(" WHERE id = ").push_bind(Uuid::from(id));
        qb.push(" RETURNING ").push(COLUMNS);

        let row = qb
            .build_query_as::<ExchangeRateRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("ExchangeRate", id))?;
        Ok(ExchangeRate::try_from(row)?)
    }

    #[instrument(skip(self), fields(rate_id = %id))]
    async fn delete(&self, id: ExchangeRateId) -> Result<(), PortError> {
        debug!("Deleting exchange rate");
        let result = sqlx::query("DELETE FROM exchange_rates WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("ExchangeRate", id).into());
        }
        Ok(())
    }
}
