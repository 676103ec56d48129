#![allow(dead_code)]

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{Method, Request, StatusCode},
    Router,
};
use installbase_api::{app, apply_migrations, AppState};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection as _;
use tower::ServiceExt as _;
use uuid::Uuid;

const BODY_LIMIT: usize = 64 * 1024;

/// Database URL for integration tests. Tests needing a database are `#[ignore]`d and
/// fail here when run without one (`cargo test -- --ignored`).
pub fn test_database_url() -> anyhow::Result<String> {
    std::env::var("TEST_DATABASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .context("TEST_DATABASE_URL must point at a PostgreSQL server for database tests")
}

/// Router whose pool never connects unless a handler reaches the database.
pub fn lazy_router() -> anyhow::Result<Router> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy("postgres://nobody@127.0.0.1:1/unused")
        .context("build lazy pool")?;
    Ok(app(AppState::new(pool, "public"), BODY_LIMIT))
}

/// Full application on a fresh per-test schema. Call `cleanup` at the end.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    schema: String,
    database_url: String,
}

impl TestApp {
    /// Application on the database named by `TEST_DATABASE_URL`.
    pub async fn from_env() -> anyhow::Result<Self> {
        Self::new(&test_database_url()?).await
    }

    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let schema = format!("test_{}", Uuid::new_v4().simple());
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(database_url)
            .await
            .context("connect test database")?;
        apply_migrations(&pool, &schema).await.context("create test schema")?;

        let state = AppState::new(pool, schema.as_str());
        let router = app(state.clone(), BODY_LIMIT);
        Ok(Self {
            router,
            state,
            schema,
            database_url: database_url.to_string(),
        })
    }

    pub async fn cleanup(self) -> anyhow::Result<()> {
        self.state.pool.close().await;
        let mut conn = sqlx::PgConnection::connect(&self.database_url)
            .await
            .context("connect for schema drop")?;
        sqlx::query(&format!(r#"DROP SCHEMA "{}" CASCADE"#, self.schema))
            .execute(&mut conn)
            .await
            .context("drop test schema")?;
        Ok(())
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Bytes)> {
        send(&self.router, method, path, body).await
    }

    pub async fn json(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let (status, bytes) = self.request(method, path, body).await?;
        Ok((status, parse_json(&bytes)?))
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Bytes)> {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&value)?)
        }
        None => Body::empty(),
    };
    send_request(router, builder.body(body).context("build request")?).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Bytes)> {
    let response = router.clone().oneshot(request).await.context("router call")?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .context("read body")?;
    Ok((status, bytes))
}

pub fn parse_json(bytes: &Bytes) -> anyhow::Result<Value> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).context("parse response json")
}
