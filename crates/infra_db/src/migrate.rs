//! Embedded schema migrations

use tracing::info;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

/// Applies every migration under `migrations/` that has not run yet
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations complete");
    Ok(())
}
