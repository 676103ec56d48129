//! Shared application state for all routes.

use crate::error::AppError;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Schema holding the entity tables.
    pub schema: Arc<str>,
}

impl AppState {
    pub fn new(pool: PgPool, schema: impl Into<Arc<str>>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    /// One pooled connection for the current request. It goes back to the pool
    /// when dropped, whichever way the handler exits.
    pub async fn connection(&self) -> Result<PoolConnection<Postgres>, AppError> {
        Ok(self.pool.acquire().await?)
    }
}
