//! Server: loads settings, prepares the database, mounts common and `/v1` entity routes.

use installbase_api::{app, apply_migrations, ensure_database_exists, logging, AppState, Settings};
use std::future::Future;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;

    if settings.run_migrations {
        apply_migrations(&pool, &settings.schema).await?;
    }

    let state = AppState::new(pool.clone(), settings.schema.as_str());
    let router = app(state, settings.max_body_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;
    pool.close().await;
    Ok(())
}

/// Resolves once `signal` fires. If the signal cannot be listened for, the server
/// keeps running instead of shutting down.
async fn shutdown_on(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn signal_ends_the_wait() {
        let done = tokio::time::timeout(Duration::from_secs(1), shutdown_on(async { Ok(()) })).await;
        assert!(done.is_ok());
    }

    #[tokio::test]
    async fn failed_listener_does_not_trigger_shutdown() {
        let failing = async { Err(std::io::Error::new(std::io::ErrorKind::Other, "no signal handler")) };
        let done = tokio::time::timeout(Duration::from_millis(100), shutdown_on(failing)).await;
        assert!(done.is_err(), "shutdown must not start when the listener fails");
    }
}
