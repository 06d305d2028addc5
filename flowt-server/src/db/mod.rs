//! Database layer - schema setup, connection pool and repositories
//!
//! # Design Principles
//!
//! - One pooled connection per request, never shared between requests
//! - Every value is a bind parameter; id lists bind as arrays
//! - Rely on DB constraints, translate violations into domain errors
//! - Writes and the re-fetch that follows are separate statements

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::create_pool;
pub use repos::*;
