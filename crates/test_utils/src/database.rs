//! Throwaway PostgreSQL for the repository and end-to-end suites
//!
//! Every test gets its own container with the embedded migrations applied,
//! so tests never see each other's rows. Docker must be running; the tests
//! are `#[ignore]`d by default and run with `cargo test -- --ignored`.

use std::time::Duration;

use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

use infra_db::{create_pool, run_migrations, DatabaseConfig, DatabasePool, Repositories};

const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "ledger";
const POSTGRES_PASSWORD: &str = "ledger";
const POSTGRES_DB: &str = "guarantees_test";

pub type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Where a started container can be reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerAddress {
    pub host: String,
    pub port: u16,
}

impl ContainerAddress {
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{POSTGRES_USER}:{POSTGRES_PASSWORD}@{}:{}/{POSTGRES_DB}",
            self.host, self.port
        )
    }
}

/// A migrated database that lives as long as this value
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pub address: ContainerAddress,
    pool: DatabasePool,
}

impl TestDatabase {
    /// Starts a container, opens a small pool and applies the migrations
    pub async fn start() -> TestResult<Self> {
        let container = Postgres::default()
            .with_user(POSTGRES_USER)
            .with_password(POSTGRES_PASSWORD)
            .with_db_name(POSTGRES_DB)
            .with_tag(POSTGRES_TAG)
            .start()
            .await?;

        let address = ContainerAddress {
            host: container.get_host().await?.to_string(),
            port: container.get_host_port_ipv4(5432).await?,
        };
        let config = DatabaseConfig::new(address.connection_url())
            .max_connections(5)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30));
        let pool = create_pool(config).await?;
        run_migrations(&pool).await?;

        Ok(Self {
            _container: container,
            address,
            pool,
        })
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    pub fn repositories(&self) -> Repositories {
        Repositories::new(self.pool.clone())
    }

    /// Rows currently in `table`, for asserting cascades and cleanups
    pub async fn row_count(&self, table: &str) -> TestResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Runs a body against a fresh database; ignored unless asked for
#[macro_export]
macro_rules! db_test {
    ($name:ident, |$db:ident| $body:block) => {
        #[tokio::test]
        #[ignore = "requires docker"]
        async fn $name() {
            let $db = $crate::database::TestDatabase::start()
                .await
                .expect("test database should start");
            $body
        }
    };
}
