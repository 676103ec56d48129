//! Routes outside `/v1`: liveness, readiness, build info, OpenAPI document.

use crate::error::AppError;
use crate::openapi::openapi;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use sqlx::Connection;

/// Body of `/health` and `/ready`. `database` is only reported by `/ready`.
#[derive(Serialize)]
struct Probe {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

impl Probe {
    const LIVE: Probe = Probe { status: "ok", database: None };
    const READY: Probe = Probe { status: "ok", database: Some("ok") };
    const DEGRADED: Probe = Probe { status: "degraded", database: Some("unavailable") };
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

/// Takes a connection the same way entity handlers do and pings it.
async fn database_reachable(state: &AppState) -> Result<(), AppError> {
    let mut conn = state.connection().await?;
    conn.ping().await?;
    Ok(())
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Probe>) {
    match database_reachable(&state).await {
        Ok(()) => (StatusCode::OK, Json(Probe::READY)),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Probe::DEGRADED))
        }
    }
}

/// GET /health, /ready (pings the database), /version, /openapi.json.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(Probe::LIVE) }))
        .route("/ready", get(ready))
        .route(
            "/version",
            get(|| async {
                Json(BuildInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                })
            }),
        )
        .route("/openapi.json", get(|| async { Json(openapi()) }))
        .with_state(state)
}
