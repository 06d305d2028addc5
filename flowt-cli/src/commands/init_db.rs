//! Schema initialization command

use anyhow::{Context, Result};
use clap::Parser;

use flowt_server::db::schema;
use flowt_server::DbConfig;

use super::DbArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Create the database and tables if they are missing
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = DbConfig::from(args.db);

    schema::initialize(&config)
        .await
        .with_context(|| format!("Failed to initialize database '{}'", config.database))?;

    Ok(())
}
