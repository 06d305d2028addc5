//! Subcommands and the database options they share

pub mod init_db;
pub mod serve;

use clap::Args;
use flowt_server::config::{
    DbConfig, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT, DEFAULT_USER,
};

/// Database connection options
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database server host
    #[arg(long, env = "FLOWT_DB_HOST", default_value = DEFAULT_HOST)]
    pub db_host: String,

    /// Database server port
    #[arg(long, env = "FLOWT_DB_PORT", default_value_t = DEFAULT_PORT)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "FLOWT_DB_USER", default_value = DEFAULT_USER)]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "FLOWT_DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub db_password: String,

    /// Database name (created on startup if missing)
    #[arg(long, env = "FLOWT_DB_NAME", default_value = DEFAULT_DATABASE)]
    pub db_name: String,

    /// Maximum pooled connections
    #[arg(long, env = "FLOWT_DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl From<DbArgs> for DbConfig {
    fn from(args: DbArgs) -> Self {
        Self {
            host: args.db_host,
            port: args.db_port,
            user: args.db_user,
            password: args.db_password,
            database: args.db_name,
            max_connections: args.max_connections,
        }
    }
}
