//! Database connection pool management
//!
//! Uses sqlx PgPool with an explicit connection limit taken from
//! [`DbConfig`].

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DbConfig;

/// Create a PostgreSQL connection pool for the task database.
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::default()).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        host = %config.host,
        database = %config.database,
        max_connections = config.max_connections,
        "Opening connection pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options())
        .await
}

