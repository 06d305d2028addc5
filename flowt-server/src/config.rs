//! Database connection parameters
//!
//! Built once at startup and handed to the schema initializer and the
//! connection pool. Nothing in the server reads connection settings from
//! globals.

use sqlx::postgres::PgConnectOptions;

/// Database the initializer connects to before the target exists.
pub const MAINTENANCE_DATABASE: &str = "postgres";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_DATABASE: &str = "flow_t";

/// Kept low: every request holds at most one connection, and the
/// workload is single-statement CRUD.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection parameters for the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DbConfig {
    /// Options for the server itself, without selecting the task database.
    pub fn server_options(&self) -> PgConnectOptions {
        self.base_options().database(MAINTENANCE_DATABASE)
    }

    /// Options for the task database.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.base_options().database(&self.database)
    }

    fn base_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DbConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "flow_t");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn connect_options_select_target_database() {
        let config = DbConfig {
            database: "tasks_dev".into(),
            ..DbConfig::default()
        };
        assert_eq!(config.connect_options().get_database(), Some("tasks_dev"));
        assert_eq!(
            config.server_options().get_database(),
            Some(MAINTENANCE_DATABASE)
        );
    }
}
