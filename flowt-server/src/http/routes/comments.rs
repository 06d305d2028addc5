//! Comment endpoints

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};

use crate::db::repos::{CommentRepo, TaskRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{DbConn, JsonBody, PathParam};
use crate::http::server::AppState;
use crate::models::{CommentBody, Task};

/// POST /tasks/{id}/comment/ - returns the parent task, not the comment
async fn add_comment(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
    JsonBody(body): JsonBody<CommentBody>,
) -> Result<Json<Task>, ApiError> {
    CommentRepo::new(&mut conn)
        .add(id, &body.into_inner())
        .await?;

    let task = TaskRepo::new(&mut conn).get(id).await?;
    Ok(Json(task))
}

/// GET /tasks/comments/{id}
async fn list_comments(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Vec<String>>, ApiError> {
    let comments = CommentRepo::new(&mut conn).list(id).await?;
    Ok(Json(comments))
}

/// DELETE /tasks/{id}/comments/ - returns the remaining (empty) list
async fn delete_comments(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Vec<String>>, ApiError> {
    let remaining = CommentRepo::new(&mut conn).delete_all(id).await?;
    Ok(Json(remaining))
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks/{id}/comment/", post(add_comment))
        .route("/tasks/comments/{id}", get(list_comments))
        .route("/tasks/{id}/comments/", delete(delete_comments))
}
