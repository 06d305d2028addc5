//! Repository implementations for database access
//!
//! Repositories borrow the request's connection rather than a pool, so a
//! handler's statements all run on the one connection it acquired.

pub mod comments;
pub mod tasks;

pub use comments::CommentRepo;
pub use tasks::TaskRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} '{id}' is still referenced by {referenced_by}")]
    Referenced {
        resource: &'static str,
        id: String,
        referenced_by: &'static str,
    },
}

/// True when the store rejected a write because of a foreign key.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error().map(|e| e.kind()),
        Some(sqlx::error::ErrorKind::ForeignKeyViolation)
    )
}

/// Render an id list for error messages.
pub(crate) fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
