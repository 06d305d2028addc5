//! Task repository
//!
//! Handles task CRUD with:
//! - Partial updates rendered from assignments via `QueryBuilder`
//! - Bulk create/update inside one transaction per request
//! - Id lists bound as `BIGINT[]` (`= ANY($1)`)
//!
//! Every write is followed by a separate `SELECT` for the row(s) returned
//! to the caller.

use chrono::{DateTime, Utc};
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};

use super::{is_foreign_key_violation, join_ids, DbError};
use crate::models::{Assignment, Column, FieldValue, NewTask, Page, SortField, Task};

/// `SELECT <all task columns> FROM tasks`, followed by the given clauses.
macro_rules! select_tasks {
    ($($clause:literal),*) => {
        concat!(
            "SELECT id, title, description, completed, priority, created_at, \
             reminder, due_date, assigned_to FROM tasks"
            $(, " ", $clause)*
        )
    };
}

/// Task repository
pub struct TaskRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> TaskRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Insert a task and return it as stored.
    pub async fn create(&mut self, task: NewTask) -> Result<Task, DbError> {
        let id = insert(&mut *self.conn, &task).await?;
        tracing::debug!(id, "Created task");
        self.get(id).await
    }

    /// Page through tasks in id order.
    pub async fn list(&mut self, page: Page) -> Result<Vec<Task>, DbError> {
        let tasks = sqlx::query_as::<_, Task>(select_tasks!("ORDER BY id LIMIT $1 OFFSET $2"))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(tasks)
    }

    /// Get a single task by ID.
    pub async fn get(&mut self, id: i64) -> Result<Task, DbError> {
        find(&mut *self.conn, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Apply the given assignments, then re-fetch.
    ///
    /// An id that matches nothing surfaces as `NotFound` from the re-fetch.
    pub async fn update(
        &mut self,
        id: i64,
        assignments: Vec<Assignment>,
    ) -> Result<Task, DbError> {
        apply(&mut *self.conn, id, assignments).await?;
        self.get(id).await
    }

    /// Delete a task, returning the row as it was before deletion.
    pub async fn delete(&mut self, id: i64) -> Result<Task, DbError> {
        let task = self.get(id).await?;

        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(|e| still_referenced(e, id.to_string()))?;

        tracing::debug!(id, "Deleted task");
        Ok(task)
    }

    /// Case-insensitive substring match on title or description.
    pub async fn search(&mut self, query: &str) -> Result<Vec<Task>, DbError> {
        let pattern = format!("%{}%", escape_like(query));

        let tasks = sqlx::query_as::<_, Task>(select_tasks!(
            "WHERE title ILIKE $1 OR description ILIKE $1",
            "ORDER BY id"
        ))
        .bind(pattern)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(tasks)
    }

    /// All tasks, ascending by the chosen column.
    pub async fn sorted(&mut self, field: SortField) -> Result<Vec<Task>, DbError> {
        let sql = match field {
            SortField::CreatedAt => select_tasks!("ORDER BY created_at, id"),
            SortField::Title => select_tasks!("ORDER BY title, id"),
        };

        let tasks = sqlx::query_as::<_, Task>(sql)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(tasks)
    }

    /// Tasks with exactly this priority, or every task when `None`.
    pub async fn by_priority(&mut self, priority: Option<i32>) -> Result<Vec<Task>, DbError> {
        let tasks = match priority {
            Some(priority) => {
                sqlx::query_as::<_, Task>(select_tasks!("WHERE priority = $1", "ORDER BY id"))
                    .bind(priority)
                    .fetch_all(&mut *self.conn)
                    .await?
            }
            None => {
                sqlx::query_as::<_, Task>(select_tasks!("ORDER BY id"))
                    .fetch_all(&mut *self.conn)
                    .await?
            }
        };

        Ok(tasks)
    }

    /// Incomplete tasks whose due date lies before `now`.
    pub async fn overdue(&mut self, now: DateTime<Utc>) -> Result<Vec<Task>, DbError> {
        let tasks = sqlx::query_as::<_, Task>(select_tasks!(
            "WHERE due_date < $1 AND completed = FALSE",
            "ORDER BY due_date, id"
        ))
        .bind(now)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(tasks)
    }

    pub async fn set_reminder(&mut self, id: i64, at: DateTime<Utc>) -> Result<Task, DbError> {
        self.update(id, vec![(Column::Reminder, FieldValue::Timestamp(at))])
            .await
    }

    pub async fn assign(&mut self, id: i64, user_id: i64) -> Result<Task, DbError> {
        self.update(id, vec![(Column::AssignedTo, FieldValue::BigInt(user_id))])
            .await
    }

    pub async fn set_priority(&mut self, id: i64, priority: i32) -> Result<Task, DbError> {
        self.update(id, vec![(Column::Priority, FieldValue::Int(priority))])
            .await
    }

    /// Tasks assigned to a user.
    pub async fn assigned_to(&mut self, user_id: i64) -> Result<Vec<Task>, DbError> {
        let tasks = sqlx::query_as::<_, Task>(select_tasks!("WHERE assigned_to = $1", "ORDER BY id"))
            .bind(user_id)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(tasks)
    }

    /// Copy title, description, completion and priority into a new row.
    pub async fn duplicate(&mut self, id: i64) -> Result<Task, DbError> {
        let source = self.get(id).await?;
        let new_id = insert(&mut *self.conn, &NewTask::from(source)).await?;
        tracing::debug!(source = id, id = new_id, "Duplicated task");
        self.get(new_id).await
    }

    /// Insert every task in one transaction.
    ///
    /// Returns the inserted rows, newest first.
    pub async fn bulk_create(&mut self, tasks: Vec<NewTask>) -> Result<Vec<Task>, DbError> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.conn.begin().await?;
        let mut ids = Vec::with_capacity(tasks.len());
        for task in &tasks {
            ids.push(insert(&mut *tx, task).await?);
        }
        tx.commit().await?;

        tracing::debug!(count = ids.len(), "Bulk created tasks");

        let tasks = sqlx::query_as::<_, Task>(select_tasks!("WHERE id = ANY($1)", "ORDER BY id DESC"))
            .bind(&ids)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(tasks)
    }

    /// Apply each entry's assignments in one transaction, skipping entries
    /// with nothing to change, then re-fetch every targeted id.
    pub async fn bulk_update(
        &mut self,
        updates: Vec<(i64, Vec<Assignment>)>,
    ) -> Result<Vec<Task>, DbError> {
        let ids: Vec<i64> = updates.iter().map(|(id, _)| *id).collect();

        let mut tx = self.conn.begin().await?;
        for (id, assignments) in updates {
            if assignments.is_empty() {
                continue;
            }
            apply(&mut *tx, id, assignments).await?;
        }
        tx.commit().await?;

        fetch_many(&mut *self.conn, &ids).await
    }

    /// Delete whichever of `ids` exist, returning them as they were.
    ///
    /// Unknown ids are ignored; `NotFound` only when none match.
    pub async fn bulk_delete(&mut self, ids: &[i64]) -> Result<Vec<Task>, DbError> {
        let tasks = fetch_many(&mut *self.conn, ids).await?;
        if tasks.is_empty() {
            return Err(DbError::NotFound {
                resource: "tasks",
                id: join_ids(ids),
            });
        }

        let found: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        sqlx::query("DELETE FROM tasks WHERE id = ANY($1)")
            .bind(&found)
            .execute(&mut *self.conn)
            .await
            .map_err(|e| still_referenced(e, join_ids(&found)))?;

        tracing::debug!(count = found.len(), "Bulk deleted tasks");
        Ok(tasks)
    }
}

async fn insert(conn: &mut PgConnection, task: &NewTask) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO tasks (title, description, completed, priority, due_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(task.title.as_str())
    .bind(task.description.as_deref())
    .bind(task.completed)
    .bind(task.priority)
    .bind(task.due_date)
    .fetch_one(conn)
    .await
}

async fn find(conn: &mut PgConnection, id: i64) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(select_tasks!("WHERE id = $1"))
        .bind(id)
        .fetch_optional(conn)
        .await
}

async fn fetch_many(conn: &mut PgConnection, ids: &[i64]) -> Result<Vec<Task>, DbError> {
    let tasks = sqlx::query_as::<_, Task>(select_tasks!("WHERE id = ANY($1)", "ORDER BY id"))
        .bind(ids)
        .fetch_all(conn)
        .await?;

    Ok(tasks)
}

async fn apply(
    conn: &mut PgConnection,
    id: i64,
    assignments: Vec<Assignment>,
) -> Result<(), sqlx::Error> {
    if assignments.is_empty() {
        return Ok(());
    }

    update_statement(id, assignments).build().execute(conn).await?;
    Ok(())
}

/// `UPDATE tasks SET a = $1, b = $2 WHERE id = $3`
///
/// Column names come from [`Column`]; every value is bound.
fn update_statement(id: i64, assignments: Vec<Assignment>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE tasks SET ");

    let mut set = builder.separated(", ");
    for (column, value) in assignments {
        set.push(format_args!("{} = ", column.as_str()));
        match value {
            FieldValue::Text(v) => set.push_bind_unseparated(v),
            FieldValue::Bool(v) => set.push_bind_unseparated(v),
            FieldValue::Int(v) => set.push_bind_unseparated(v),
            FieldValue::BigInt(v) => set.push_bind_unseparated(v),
            FieldValue::Timestamp(v) => set.push_bind_unseparated(v),
        };
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder
}

/// Escape `LIKE` wildcards so the query matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn not_found(id: i64) -> DbError {
    DbError::NotFound {
        resource: "task",
        id: id.to_string(),
    }
}

fn still_referenced(err: sqlx::Error, id: String) -> DbError {
    if is_foreign_key_violation(&err) {
        DbError::Referenced {
            resource: "task",
            id,
            referenced_by: "comments",
        }
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_macro_appends_clauses() {
        assert_eq!(
            select_tasks!("WHERE id = $1"),
            "SELECT id, title, description, completed, priority, created_at, \
             reminder, due_date, assigned_to FROM tasks WHERE id = $1"
        );
        assert!(select_tasks!().ends_with("FROM tasks"));
    }

    #[test]
    fn update_binds_every_value() {
        let builder = update_statement(
            42,
            vec![
                (Column::Title, FieldValue::Text("x'; DROP TABLE tasks; --".into())),
                (Column::Completed, FieldValue::Bool(true)),
            ],
        );
        assert_eq!(
            builder.sql(),
            "UPDATE tasks SET title = $1, completed = $2 WHERE id = $3"
        );
    }

    #[test]
    fn single_assignment_update() {
        let builder = update_statement(7, vec![(Column::AssignedTo, FieldValue::BigInt(3))]);
        assert_eq!(builder.sql(), "UPDATE tasks SET assigned_to = $1 WHERE id = $2");
    }

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("milk"), "milk");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn not_found_names_the_task() {
        let err = not_found(999_999);
        assert_eq!(err.to_string(), "not found: task '999999'");
    }

    #[test]
    fn non_fk_errors_pass_through() {
        let err = still_referenced(sqlx::Error::RowNotFound, "1".into());
        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
