//! Task comment repository

use sqlx::PgConnection;

use super::{is_foreign_key_violation, DbError};

/// Comment repository
pub struct CommentRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> CommentRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Attach a comment to a task.
    ///
    /// No existence check beforehand: the foreign key rejects unknown task
    /// ids, which is reported as the task not being found.
    pub async fn add(&mut self, task_id: i64, comment: &str) -> Result<(), DbError> {
        sqlx::query("INSERT INTO task_comments (task_id, comment) VALUES ($1, $2)")
            .bind(task_id)
            .bind(comment)
            .execute(&mut *self.conn)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DbError::NotFound {
                        resource: "task",
                        id: task_id.to_string(),
                    }
                } else {
                    e.into()
                }
            })?;

        Ok(())
    }

    /// Comment texts for a task, in insertion order.
    pub async fn list(&mut self, task_id: i64) -> Result<Vec<String>, DbError> {
        let comments = sqlx::query_scalar::<_, String>(
            "SELECT comment FROM task_comments WHERE task_id = $1 ORDER BY id",
        )
        .bind(task_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(comments)
    }

    /// Remove every comment on a task and return what remains (nothing).
    pub async fn delete_all(&mut self, task_id: i64) -> Result<Vec<String>, DbError> {
        let result = sqlx::query("DELETE FROM task_comments WHERE task_id = $1")
            .bind(task_id)
            .execute(&mut *self.conn)
            .await?;

        tracing::debug!(task_id, removed = result.rows_affected(), "Deleted comments");
        self.list(task_id).await
    }
}
