//! Task endpoints

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::db::repos::TaskRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{DbConn, JsonBody, PathParam, QueryParams};
use crate::http::server::AppState;
use crate::models::{
    AssignBody, OverdueParams, Page, PriorityBody, PriorityParams, ReminderBody, SearchParams,
    SortParams, Task, TaskCreate, TaskUpdate,
};

/// POST /tasks/ - create a task
async fn create_task(
    DbConn(mut conn): DbConn,
    JsonBody(req): JsonBody<TaskCreate>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let new = req.validate()?;
    let task = TaskRepo::new(&mut conn).create(new).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks/?skip&limit - one page of tasks
async fn list_tasks(
    QueryParams(page): QueryParams<Page>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = TaskRepo::new(&mut conn).list(page).await?;
    Ok(Json(tasks))
}

/// GET /tasks/{id}
async fn get_task(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Task>, ApiError> {
    let task = TaskRepo::new(&mut conn).get(id).await?;
    Ok(Json(task))
}

/// PUT /tasks/{id} - change only the supplied fields
async fn update_task(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
    JsonBody(update): JsonBody<TaskUpdate>,
) -> Result<Json<Task>, ApiError> {
    let assignments = update.assignments()?;
    if assignments.is_empty() {
        return Err(ApiError::BadRequest {
            message: "no update parameters provided".into(),
        });
    }

    let task = TaskRepo::new(&mut conn).update(id, assignments).await?;
    Ok(Json(task))
}

/// DELETE /tasks/{id} - returns the task as it was
async fn delete_task(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Task>, ApiError> {
    let task = TaskRepo::new(&mut conn).delete(id).await?;
    Ok(Json(task))
}

/// GET /tasks/search/?query
async fn search_tasks(
    QueryParams(params): QueryParams<SearchParams>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = TaskRepo::new(&mut conn).search(&params.query).await?;
    Ok(Json(tasks))
}

/// GET /tasks/sort/?sort_by
async fn sort_tasks(
    QueryParams(params): QueryParams<SortParams>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = TaskRepo::new(&mut conn).sorted(params.sort_by).await?;
    Ok(Json(tasks))
}

/// GET /tasks/priority/?priority
async fn tasks_by_priority(
    QueryParams(params): QueryParams<PriorityParams>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = TaskRepo::new(&mut conn).by_priority(params.priority).await?;
    Ok(Json(tasks))
}

/// POST /tasks/{id}/reminder/
async fn set_reminder(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
    JsonBody(body): JsonBody<ReminderBody>,
) -> Result<Json<Task>, ApiError> {
    let task = TaskRepo::new(&mut conn)
        .set_reminder(id, body.into_inner().into())
        .await?;
    Ok(Json(task))
}

/// GET /tasks/overdue/?current_time
async fn overdue_tasks(
    QueryParams(params): QueryParams<OverdueParams>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = TaskRepo::new(&mut conn).overdue(params.current_time).await?;
    Ok(Json(tasks))
}

/// POST /tasks/{id}/assign/
async fn assign_task(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
    JsonBody(body): JsonBody<AssignBody>,
) -> Result<Json<Task>, ApiError> {
    let task = TaskRepo::new(&mut conn).assign(id, body.into_inner()).await?;
    Ok(Json(task))
}

/// GET /tasks/assigned/{user_id}
async fn assigned_tasks(
    PathParam(user_id): PathParam<i64>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = TaskRepo::new(&mut conn).assigned_to(user_id).await?;
    Ok(Json(tasks))
}

/// POST /tasks/duplicate/{id}
async fn duplicate_task(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = TaskRepo::new(&mut conn).duplicate(id).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tasks/{id}/priority/
async fn set_priority(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
    JsonBody(body): JsonBody<PriorityBody>,
) -> Result<Json<Task>, ApiError> {
    let task = TaskRepo::new(&mut conn)
        .set_priority(id, body.into_inner())
        .await?;
    Ok(Json(task))
}

/// Task routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks/", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tasks/search/", get(search_tasks))
        .route("/tasks/sort/", get(sort_tasks))
        .route("/tasks/priority/", get(tasks_by_priority))
        .route("/tasks/overdue/", get(overdue_tasks))
        .route("/tasks/{id}/reminder/", post(set_reminder))
        .route("/tasks/{id}/assign/", post(assign_task))
        .route("/tasks/assigned/{user_id}", get(assigned_tasks))
        .route("/tasks/duplicate/{id}", post(duplicate_task))
        .route("/tasks/{id}/priority/", put(set_priority))
}

#[cfg(test)]
mod tests {
    //! Routing and input validation only; these requests are rejected
    //! before a connection is acquired. Database-backed behaviour lives in
    //! `tests/tasks_api.rs`.

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::config::DbConfig;
    use crate::http::server::{build_router, AppState};

    fn app() -> axum::Router {
        let pool = PgPoolOptions::new().connect_lazy_with(DbConfig::default().connect_options());
        build_router(AppState { pool }, false)
    }

    async fn get_status(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn limit_over_100_is_422() {
        let (status, body) = get_status("/tasks/?limit=101").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn negative_skip_is_422() {
        let (status, _) = get_status("/tasks/?skip=-1").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unknown_sort_column_is_422() {
        let (status, _) = get_status("/tasks/sort/?sort_by=priority").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn non_integer_id_is_422() {
        let (status, body) = get_status("/tasks/abc").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn search_requires_query() {
        let (status, _) = get_status("/tasks/search/").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn overdue_requires_timestamp() {
        let (status, _) = get_status("/tasks/overdue/?current_time=yesterday").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn health_does_not_touch_database() {
        let (status, body) = get_status("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
