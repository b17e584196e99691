//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the guarantee ledger using SQLx. Every record type
//! gets one repository implementing `core_kernel::Repository`, so the HTTP
//! layer never sees SQL.
//!
//! # Relations
//!
//! Letters and credits are read with a left join on their bank and project.
//! There is no foreign key from a letter or credit to its bank or project;
//! the reference is checked when it is written instead, and a later delete of
//! the bank or project simply makes the joined relation come back empty.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, Repositories, create_pool, run_migrations};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/guarantees")).await?;
//! run_migrations(&pool).await?;
//! let repositories = Repositories::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod migrate;
pub mod repositories;

pub use pool::{DatabasePool, create_pool, create_lazy_pool, check_connection, DatabaseConfig};
pub use error::DatabaseError;
pub use migrate::run_migrations;
pub use repositories::{
    Repositories,
    PgProjectRepository, PgBankRepository, PgCurrencyRepository, PgExchangeRateRepository,
    PgGuaranteeLetterRepository, PgCreditRepository, PgLetterPaymentRepository,
};
