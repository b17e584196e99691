//! PostgreSQL pool setup
//!
//! Handlers never hold a connection across requests; each repository call
//! borrows one from the shared pool for the statements it runs.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Shared handle every repository is built from
pub type DatabasePool = PgPool;

/// Pool sizing and timeouts
///
/// ```rust
/// use infra_db::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("postgres://localhost/guarantees")
///     .max_connections(20)
///     .acquire_timeout(Duration::from_secs(5));
/// assert_eq!(config.min_connections, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// How long a query waits for a free connection before failing
    pub acquire_timeout: Duration,
    /// Connections older than this are recycled
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(30),
            max_lifetime: Duration::from_secs(30 * 60),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min.min(self.max_connections);
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .max_lifetime(self.max_lifetime)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("postgres://localhost/guarantees")
    }
}

/// Opens the pool and waits for the first `min_connections` to succeed
///
/// # Errors
///
/// `DatabaseError::ConnectionFailed` when the server cannot be reached
/// within the acquire timeout.
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Opening database pool"
    );

    let pool = config
        .options()
        .min_connections(config.min_connections)
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Database pool ready");
    Ok(pool)
}

/// Builds a pool that dials nothing until the first query
///
/// Fails only on a malformed URL, never on an unreachable server.
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    config
        .options()
        .connect_lazy(&config.url)
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

/// `SELECT 1` through the pool; backs the readiness probe
pub async fn check_connection(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_connections_capped_by_max() {
        let config = DatabaseConfig::new("postgres://test")
            .max_connections(4)
            .min_connections(10)
            .acquire_timeout(Duration::from_secs(3));

        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 4);
        assert_eq!(config.acquire_timeout, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_lazy_pool_does_not_connect() {
        let config = DatabaseConfig::new("postgres://nobody@127.0.0.1:1/none");
        let pool = create_lazy_pool(&config).unwrap();
        assert_eq!(pool.size(), 0);
    }

    #[test]
    fn test_lazy_pool_rejects_malformed_url() {
        let err = create_lazy_pool(&DatabaseConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, DatabaseError::ConnectionFailed(_)));
    }
}
