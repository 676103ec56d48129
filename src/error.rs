//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid schema name: {0}")]
    InvalidSchema(String),
    /// The URL itself stays out of the message; it may carry a password.
    #[error("DATABASE_URL is not a valid PostgreSQL connection URL")]
    InvalidDatabaseUrl(#[source] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Message is sent to the client verbatim, e.g. "Country not found".
    #[error("{0}")]
    NotFound(String),
    /// Message is sent to the client verbatim, e.g. "Country with id 7 already exists.".
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Config(_) | AppError::Db(_) => {
                tracing::error!(error = %self, "request failed");
                "Internal Server Error".to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
