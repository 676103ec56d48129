//! Generic CRUD execution against PostgreSQL.

use crate::error::AppError;
use crate::model::Entity;
use crate::service::Outcome;
use crate::sql::{delete, insert, merge, replace, select_by_id, select_list};
use sqlx::PgConnection;
use std::marker::PhantomData;

/// CRUD for one entity type, bound to one connection for its whole lifetime.
/// Built per request; holds no state beyond the borrowed connection.
pub struct EntityStore<'c, E> {
    conn: &'c mut PgConnection,
    schema: &'c str,
    _entity: PhantomData<fn() -> E>,
}

impl<'c, E: Entity> EntityStore<'c, E> {
    pub fn new(conn: &'c mut PgConnection, schema: &'c str) -> Self {
        Self {
            conn,
            schema,
            _entity: PhantomData,
        }
    }

    /// Insert a fully specified record. A duplicate id yields `Conflict` and
    /// leaves the stored row untouched; any other database error is a fault.
    pub async fn create(&mut self, record: &E) -> Result<Outcome<E>, AppError> {
        let sql = insert(&E::TABLE, self.schema);
        tracing::debug!(sql = %sql, id = record.id(), "query");
        let query = record.bind_fields(sqlx::query_as::<_, E>(&sql).bind(record.id()));
        match query.fetch_one(&mut *self.conn).await {
            Ok(row) => Ok(Outcome::Done(row)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::debug!(table = E::TABLE.table, id = record.id(), "duplicate id");
                Ok(Outcome::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&mut self) -> Result<Vec<E>, AppError> {
        let sql = select_list(&E::TABLE, self.schema);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&mut *self.conn).await?;
        Ok(rows)
    }

    pub async fn get(&mut self, id: i32) -> Result<Outcome<E>, AppError> {
        let sql = select_by_id(&E::TABLE, self.schema);
        self.fetch_by_id(&sql, id).await
    }

    /// Delete by id and return the row as it was before removal.
    pub async fn delete(&mut self, id: i32) -> Result<Outcome<E>, AppError> {
        let sql = delete(&E::TABLE, self.schema);
        self.fetch_by_id(&sql, id).await
    }

    /// Overwrite every data column of row `id`. `record.id()` is ignored.
    pub async fn replace(&mut self, id: i32, record: &E) -> Result<Outcome<E>, AppError> {
        let sql = replace(&E::TABLE, self.schema);
        tracing::debug!(sql = %sql, id, "query");
        let query = record.bind_fields(sqlx::query_as::<_, E>(&sql).bind(id));
        let row = query.fetch_optional(&mut *self.conn).await?;
        Ok(row.into())
    }

    /// Overwrite only the fields present in `patch`, atomically.
    pub async fn merge(&mut self, id: i32, patch: &E::Patch) -> Result<Outcome<E>, AppError> {
        let sql = merge(&E::TABLE, self.schema);
        tracing::debug!(sql = %sql, id, "query");
        let query = E::bind_patch(patch, sqlx::query_as::<_, E>(&sql).bind(id));
        let row = query.fetch_optional(&mut *self.conn).await?;
        Ok(row.into())
    }

    async fn fetch_by_id(&mut self, sql: &str, id: i32) -> Result<Outcome<E>, AppError> {
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, E>(sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row.into())
    }
}
