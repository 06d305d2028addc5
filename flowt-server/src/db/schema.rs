//! Schema initializer
//!
//! Creates the task database and its tables if they are missing. Runs once
//! at startup, before the listener is bound.

use sqlx::{Connection, PgConnection};

use crate::config::DbConfig;
use crate::Result;

/// SQLSTATE for `duplicate_database`, raised when another process created
/// the database between our existence check and `CREATE DATABASE`.
const DUPLICATE_DATABASE: &str = "42P04";

/// SQLSTATE for `unique_violation`. Two concurrent `CREATE DATABASE`
/// statements can collide on the `pg_database` catalog index instead.
const UNIQUE_VIOLATION: &str = "23505";

/// Advisory lock key held while the tables are created. Concurrent
/// `CREATE TABLE IF NOT EXISTS` on one name is not safe in PostgreSQL.
const SCHEMA_LOCK_KEY: i64 = 0x666c_6f77_74;

const CREATE_TASKS: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        completed BOOLEAN NOT NULL DEFAULT FALSE,
        priority INT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        reminder TIMESTAMPTZ,
        due_date TIMESTAMPTZ,
        assigned_to BIGINT
    )
"#;

const CREATE_TASK_COMMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS task_comments (
        id BIGSERIAL PRIMARY KEY,
        task_id BIGINT REFERENCES tasks(id),
        comment TEXT NOT NULL
    )
"#;

/// Ensure the database and both tables exist.
///
/// # Errors
///
/// Fails if the server is unreachable or the DDL is rejected; callers treat
/// this as fatal.
pub async fn initialize(config: &DbConfig) -> Result<()> {
    tracing::info!(database = %config.database, "Initializing schema...");

    let mut admin = PgConnection::connect_with(&config.server_options()).await?;
    ensure_database(&mut admin, &config.database).await?;
    admin.close().await?;

    let mut conn = PgConnection::connect_with(&config.connect_options()).await?;
    create_tables(&mut conn).await?;
    conn.close().await?;

    tracing::info!("Schema ready");
    Ok(())
}

async fn ensure_database(admin: &mut PgConnection, name: &str) -> Result<()> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(name)
            .fetch_one(&mut *admin)
            .await?;

    if exists {
        tracing::debug!(database = name, "Database already exists");
        return Ok(());
    }

    // Identifiers cannot be bound, so quote instead.
    let statement = format!("CREATE DATABASE {}", quote_ident(name));
    match sqlx::query(&statement).execute(&mut *admin).await {
        Ok(_) => {
            tracing::info!(database = name, "Created database");
            Ok(())
        }
        Err(sqlx::Error::Database(e))
            if matches!(
                e.code().as_deref(),
                Some(DUPLICATE_DATABASE | UNIQUE_VIOLATION)
            ) =>
        {
            tracing::debug!(database = name, "Database created concurrently");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn create_tables(conn: &mut PgConnection) -> Result<()> {
    let mut tx = conn.begin().await?;

    // Released at commit or rollback.
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    sqlx::query(CREATE_TASKS).execute(&mut *tx).await?;
    sqlx::query(CREATE_TASK_COMMENTS).execute(&mut *tx).await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_task_comments_task ON task_comments(task_id)")
        .execute(&mut *tx)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tasks_assigned_to ON tasks(assigned_to)")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Quote a PostgreSQL identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("flow_t"), "\"flow_t\"");
        assert_eq!(quote_ident("Flow_T"), "\"Flow_T\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
