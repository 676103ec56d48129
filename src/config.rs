//! Runtime settings from environment variables (after `.env` is loaded).

use crate::error::ConfigError;
use std::net::SocketAddr;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/installbase";
const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// `DATABASE_URL`
    pub database_url: String,
    /// `DATABASE_SCHEMA`: schema holding the entity tables.
    pub schema: String,
    /// `DATABASE_MAX_CONNECTIONS`
    pub max_connections: u32,
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `RUN_MIGRATIONS`: create missing tables at startup.
    pub run_migrations: bool,
    /// `MAX_BODY_BYTES`
    pub max_body_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let schema = get("DATABASE_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        validate_schema_name(&schema)?;

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue { key: "DATABASE_MAX_CONNECTIONS", value: v })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let bind_addr = match get("BIND_ADDR") {
            Some(v) => v
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidValue { key: "BIND_ADDR", value: v })?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "BIND_ADDR", value: DEFAULT_BIND_ADDR.into() })?,
        };
        let run_migrations = match get("RUN_MIGRATIONS") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidValue { key: "RUN_MIGRATIONS", value: v })?,
            None => true,
        };
        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue { key: "MAX_BODY_BYTES", value: v })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Settings {
            database_url,
            schema,
            max_connections,
            bind_addr,
            run_migrations,
            max_body_bytes,
        })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Schema names are interpolated into DDL; only plain lowercase identifiers are accepted.
pub fn validate_schema_name(name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if first_ok && rest_ok && name.len() <= 63 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSchema(name.to_string()))
    }
}
