//! Repository implementations
//!
//! One PostgreSQL repository per stored record, each implementing
//! `core_kernel::Repository` for its entity. Shared SQL helpers live here.

pub mod project;
pub mod bank;
pub mod currency;
pub mod exchange_rate;
pub mod guarantee_letter;
pub mod credit;
pub mod letter_payment;
mod relations;

pub use project::PgProjectRepository;
pub use bank::PgBankRepository;
pub use currency::PgCurrencyRepository;
pub use exchange_rate::PgExchangeRateRepository;
pub use guarantee_letter::PgGuaranteeLetterRepository;
pub use credit::PgCreditRepository;
pub use letter_payment::PgLetterPaymentRepository;

use sqlx::{Encode, PgPool, Postgres, QueryBuilder, Type};
use uuid::Uuid;

use core_kernel::{CurrencyCode, ListFilter};

use crate::error::DatabaseError;

/// Every repository over one shared pool
#[derive(Debug, Clone)]
pub struct Repositories {
    pub projects: PgProjectRepository,
    pub banks: PgBankRepository,
    pub currencies: PgCurrencyRepository,
    pub exchange_rates: PgExchangeRateRepository,
    pub guarantee_letters: PgGuaranteeLetterRepository,
    pub credits: PgCreditRepository,
    pub letter_payments: PgLetterPaymentRepository,
    pool: PgPool,
}

impl Repositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            projects: PgProjectRepository::new(pool.clone()),
            banks: PgBankRepository::new(pool.clone()),
            currencies: PgCurrencyRepository::new(pool.clone()),
            exchange_rates: PgExchangeRateRepository::new(pool.clone()),
            guarantee_letters: PgGuaranteeLetterRepository::new(pool.clone()),
            credits: PgCreditRepository::new(pool.clone()),
            letter_payments: PgLetterPaymentRepository::new(pool.clone()),
            pool,
        }
    }

    /// The pool the repositories share
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Appends `, column = $n` to an `UPDATE ... SET` builder
pub(crate) fn push_set<'args, T>(qb: &mut QueryBuilder<'args, Postgres>, column: &str, value: T)
where
    T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
{
    qb.push(", ").push(column).push(" = ").push_bind(value);
}

/// Appends `, column = $n` only when the patch carries the field
pub(crate) fn push_set_opt<'args, T>(
    qb: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    value: Option<T>,
) where
    T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
{
    if let Some(value) = value {
        push_set(qb, column, value);
    }
}

/// Appends the project/bank filters as a `WHERE` clause
pub(crate) fn push_relation_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    filter: &ListFilter,
    project_column: &str,
    bank_column: &str,
) {
    let mut keyword = " WHERE ";
    if let Some(project_id) = filter.project_id {
        qb.push(keyword).push(project_column).push(" = ").push_bind(Uuid::from(project_id));
        keyword = " AND ";
    }
    if let Some(bank_id) = filter.bank_id {
        qb.push(keyword).push(bank_column).push(" = ").push_bind(Uuid::from(bank_id));
    }
}

/// Returns true when a row with `id` exists in `table`
pub(crate) async fn row_exists(pool: &PgPool, table: &str, id: Uuid) -> Result<bool, DatabaseError> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)");
    let exists = sqlx::query_scalar::<_, bool>(&sql)
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Parses a stored currency code
pub(crate) fn stored_code(code: String) -> Result<CurrencyCode, DatabaseError> {
    CurrencyCode::new(&code)
        .map_err(|e| DatabaseError::SerializationError(format!("stored currency {code:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{BankId, ProjectId};
    use proptest::prelude::*;

    fn filter_sql(filter: &ListFilter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM credits");
        push_relation_filters(&mut qb, filter, "project_id", "bank_id");
        qb.sql().to_string()
    }

    #[test]
    fn test_both_filters_are_combined() {
        let filter = ListFilter {
            project_id: Some(ProjectId::new()),
            bank_id: Some(BankId::new()),
            letter_id: None,
        };
        assert_eq!(
            filter_sql(&filter),
            "SELECT * FROM credits WHERE project_id = $1 AND bank_id = $2"
        );
    }

    #[test]
    fn test_stored_code_rejects_corrupt_value() {
        let err = stored_code("US$".to_string()).unwrap_err();
        assert!(matches!(err, DatabaseError::SerializationError(_)));
    }

    proptest! {
        #[test]
        fn prop_one_bind_per_filter(
            project in proptest::option::of(any::<u128>()),
            bank in proptest::option::of(any::<u128>()),
        ) {
            let filter = ListFilter {
                project_id: project.map(|u| ProjectId::from_uuid(Uuid::from_u128(u))),
                bank_id: bank.map(|u| BankId::from_uuid(Uuid::from_u128(u))),
                letter_id: None,
            };
            let sql = filter_sql(&filter);
            let expected = usize::from(project.is_some()) + usize::from(bank.is_some());

            prop_assert_eq!(sql.matches('$').count(), expected);
            prop_assert_eq!(sql.matches(" WHERE ").count(), usize::from(expected > 0));
            prop_assert_eq!(sql.matches(" AND ").count(), usize::from(expected == 2));
        }

        #[test]
        fn prop_stored_codes_read_back_upper_case(code in "[a-zA-Z]{3}") {
            let parsed = stored_code(code.clone()).unwrap();
            prop_assert_eq!(parsed.to_string(), code.to_ascii_uppercase());
        }
    }
}
