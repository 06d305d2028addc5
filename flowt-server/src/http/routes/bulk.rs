//! Bulk endpoints
//!
//! Every entry is validated before the first statement runs, so a bad
//! title anywhere in the batch rejects the whole request.

use std::sync::Arc;

use axum::{http::StatusCode, routing::post, Json, Router};

use crate::db::repos::TaskRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{DbConn, JsonBody};
use crate::http::server::AppState;
use crate::models::{BulkTaskUpdate, NewTask, Task, TaskCreate};

/// POST /tasks/bulk/ - newest first
async fn bulk_create(
    DbConn(mut conn): DbConn,
    JsonBody(reqs): JsonBody<Vec<TaskCreate>>,
) -> Result<(StatusCode, Json<Vec<Task>>), ApiError> {
    let tasks = reqs
        .into_iter()
        .map(TaskCreate::validate)
        .collect::<Result<Vec<NewTask>, _>>()?;

    let created = TaskRepo::new(&mut conn).bulk_create(tasks).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /tasks/bulk/ - entries without fields are skipped
async fn bulk_update(
    DbConn(mut conn): DbConn,
    JsonBody(entries): JsonBody<Vec<BulkTaskUpdate>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    if entries.is_empty() {
        return Err(ApiError::BadRequest {
            message: "no tasks supplied".into(),
        });
    }

    let updates = entries
        .into_iter()
        .map(|entry| -> Result<_, ApiError> {
            Ok((entry.id, entry.changes.assignments()?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let updated = TaskRepo::new(&mut conn).bulk_update(updates).await?;
    Ok(Json(updated))
}

/// DELETE /tasks/bulk/ - unknown ids are ignored, 404 only if none match
async fn bulk_delete(
    DbConn(mut conn): DbConn,
    JsonBody(ids): JsonBody<Vec<i64>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let deleted = TaskRepo::new(&mut conn).bulk_delete(&ids).await?;
    Ok(Json(deleted))
}

/// Bulk routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/tasks/bulk/",
        post(bulk_create).put(bulk_update).delete(bulk_delete),
    )
}
