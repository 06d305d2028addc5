//! flowt CLI - task tracker server
//!
//! Entry point for the `flowt` binary:
//! - `serve`: initialize the schema and run the HTTP API
//! - `init-db`: initialize the schema only

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::init_db::InitDbArgs;
use commands::serve::ServeArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "flowt",
    author,
    version,
    about = "Task tracking HTTP service backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database and tables if needed, then serve the task API
    Serve(ServeArgs),
    /// Create the database and tables if needed, then exit
    InitDb(InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init_tracing(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::InitDb(args) => commands::init_db::run_init_db(args).await,
    }
}
