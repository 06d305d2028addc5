//! Database settings and scratch databases for the ignored tests.
//!
//! Reads the same `FLOWT_DB_*` variables as `flowt serve`.

#![allow(dead_code)]

use flowt_server::db::schema::quote_ident;
use flowt_server::DbConfig;
use sqlx::{Connection, PgConnection};
use uuid::Uuid;

pub fn db_config() -> DbConfig {
    let defaults = DbConfig::default();
    let var = |key: &str| std::env::var(key).ok();

    DbConfig {
        host: var("FLOWT_DB_HOST").unwrap_or(defaults.host),
        port: var("FLOWT_DB_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port),
        user: var("FLOWT_DB_USER").unwrap_or(defaults.user),
        password: var("FLOWT_DB_PASSWORD").unwrap_or(defaults.password),
        database: defaults.database,
        max_connections: defaults.max_connections,
    }
}

/// Settings for a database name no other test uses.
pub fn scratch_config() -> DbConfig {
    DbConfig {
        database: format!("flowt_test_{}", Uuid::new_v4().simple()),
        ..db_config()
    }
}

/// Drop the database even if sessions are still attached to it. Closed
/// pool connections can outlive `PgPool::close` on the server side.
pub async fn drop_database(config: &DbConfig) {
    let mut admin = PgConnection::connect_with(&config.server_options())
        .await
        .expect("admin connection failed");
    sqlx::query(&format!(
        "DROP DATABASE IF EXISTS {} WITH (FORCE)",
        quote_ident(&config.database)
    ))
    .execute(&mut admin)
    .await
    .expect("drop database failed");
    admin.close().await.expect("admin close failed");
}

pub async fn database_exists(config: &DbConfig) -> bool {
    let mut admin = PgConnection::connect_with(&config.server_options())
        .await
        .expect("admin connection failed");
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&config.database)
            .fetch_one(&mut admin)
            .await
            .expect("catalog query failed");
    admin.close().await.expect("admin close failed");
    exists
}
