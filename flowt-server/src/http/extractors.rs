//! Custom Axum extractors
//!
//! Wrappers around the stock extractors that reject with [`ApiError`]
//! (422 + JSON body) instead of axum's plain-text rejections, plus the
//! per-request database connection.

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use sqlx::pool::PoolConnection;
use sqlx::Postgres;

use super::error::ApiError;
use super::server::AppState;
use crate::db::repos::DbError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

/// One pooled connection, held for the rest of the request.
///
/// Returned to the pool when the handler finishes or is dropped, so two
/// in-flight requests never share a connection.
pub struct DbConn(pub PoolConnection<Postgres>);

impl FromRequestParts<Arc<AppState>> for DbConn {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let conn = state.pool.acquire().await.map_err(DbError::from)?;
        Ok(Self(conn))
    }
}
