//! Database bootstrap: create the target database when it does not exist yet.

use crate::error::{AppError, ConfigError};
use crate::sql::quoted;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use std::str::FromStr;

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// `postgres` database on the same server to run CREATE DATABASE. Call before creating
/// the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((db_name, admin)) = bootstrap_target(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Target database name and options for the admin connection. `None` when the URL
/// names no database (the server default applies) or names `postgres` itself.
fn bootstrap_target(database_url: &str) -> Result<Option<(String, PgConnectOptions)>, ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(ConfigError::InvalidDatabaseUrl)?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((db_name, opts.database("postgres"))))
}
