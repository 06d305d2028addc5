//! HTTP server command for the task API

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use flowt_server::db::{create_pool, schema};
use flowt_server::{run_server, DbConfig, ServerConfig};

use super::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "FLOWT_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = DbConfig::from(args.db);

    // Schema must exist before the first request is handled
    schema::initialize(&db_config)
        .await
        .with_context(|| format!("Failed to initialize database '{}'", db_config.database))?;

    let pool = create_pool(&db_config)
        .await
        .context("Failed to create database pool")?;

    tracing::info!("Starting flowt server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(pool, config)
        .await
        .context("Server error")?;

    Ok(())
}
