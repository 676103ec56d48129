//! `Path` and `Json` wrappers rejecting with [`AppError::Validation`].
//!
//! Rejections happen during extraction, before a handler body runs, so no
//! connection is acquired and no store call is made for invalid input.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

/// Path parameters, e.g. a non-integer `{id}` becomes 422 instead of 400.
#[derive(Clone, Debug)]
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ValidPath(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "path rejected");
                Err(AppError::Validation(rejection.body_text()))
            }
        }
    }
}

/// JSON body. Syntax errors, wrong field types, missing fields and a missing
/// `Content-Type` all become 422.
#[derive(Clone, Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "body rejected");
                Err(AppError::Validation(rejection.body_text()))
            }
        }
    }
}
