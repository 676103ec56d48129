//! Entity CRUD handlers: create, list, read, replace, merge, delete.
//!
//! Every handler is generic over [`Entity`] and instantiated once per entity by
//! the router. Each request takes one pooled connection after extraction has
//! succeeded and builds a fresh [`EntityStore`] on it.

use crate::error::AppError;
use crate::extractors::{ValidJson, ValidPath};
use crate::model::Entity;
use crate::response::{created, no_content, ok, ok_many};
use crate::service::EntityStore;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn create<E: Entity>(
    State(state): State<AppState>,
    ValidJson(record): ValidJson<E>,
) -> Result<impl IntoResponse, AppError> {
    let id = record.id();
    let mut conn = state.connection().await?;
    let row = EntityStore::<E>::new(&mut *conn, &state.schema)
        .create(&record)
        .await?
        .into_result(&E::TABLE, id)?;
    tracing::info!(entity = E::TABLE.table, id, "created");
    Ok(created(row))
}

pub async fn list<E: Entity>(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.connection().await?;
    let rows = EntityStore::<E>::new(&mut *conn, &state.schema).list().await?;
    Ok(ok_many(rows))
}

pub async fn read<E: Entity>(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.connection().await?;
    let row = EntityStore::<E>::new(&mut *conn, &state.schema)
        .get(id)
        .await?
        .into_result(&E::TABLE, id)?;
    Ok(ok(row))
}

/// PUT: the path id is the key; an `id` in the body is not applied.
pub async fn replace<E: Entity>(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(record): ValidJson<E>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.connection().await?;
    let row = EntityStore::<E>::new(&mut *conn, &state.schema)
        .replace(id, &record)
        .await?
        .into_result(&E::TABLE, id)?;
    Ok(ok(row))
}

pub async fn merge<E: Entity>(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(patch): ValidJson<E::Patch>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.connection().await?;
    let row = EntityStore::<E>::new(&mut *conn, &state.schema)
        .merge(id, &patch)
        .await?
        .into_result(&E::TABLE, id)?;
    Ok(ok(row))
}

pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.connection().await?;
    EntityStore::<E>::new(&mut *conn, &state.schema)
        .delete(id)
        .await?
        .into_result(&E::TABLE, id)?;
    tracing::info!(entity = E::TABLE.table, id, "deleted");
    Ok(no_content())
}
