//! Error types for flowt-server startup and lifecycle

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors raised outside of request handling (schema setup, binding, serving).
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
