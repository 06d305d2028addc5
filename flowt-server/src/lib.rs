//! flowt-server: HTTP task tracker
//!
//! Maps HTTP operations onto SQL statements against two tables
//! (`tasks`, `task_comments`): CRUD, partial updates, search, sorting,
//! comments, assignment and bulk operations.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::DbConfig;
pub use error::{Result, ServerError};
pub use http::{build_router, run_server, AppState, ServerConfig};
