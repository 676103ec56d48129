//! DDL for the entity tables, derived from the table descriptors.
//! Tables are created in foreign-key dependency order.

use crate::error::AppError;
use crate::model::{TableDef, ALL_TABLES, ID_COLUMN};
use crate::sql::{qualified_table, quoted};
use sqlx::PgPool;

/// `CREATE TABLE IF NOT EXISTS` for one entity: every column NOT NULL, id as
/// primary key, and a REFERENCES clause per foreign-key column.
pub fn create_table_sql(def: &TableDef, schema: &str) -> String {
    let mut col_defs: Vec<String> = Vec::with_capacity(def.columns.len() + 1);
    for c in def.columns {
        let mut col = format!("{} {} NOT NULL", quoted(c.name), c.pg_type);
        if let Some(target) = c.references {
            col.push_str(&format!(
                " REFERENCES {} ({})",
                qualified_table(schema, target),
                quoted(ID_COLUMN)
            ));
        }
        col_defs.push(col);
    }
    col_defs.push(format!("PRIMARY KEY ({})", quoted(ID_COLUMN)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        qualified_table(schema, def.table),
        col_defs.join(",\n  ")
    )
}

/// Create the schema (if missing) and every entity table. Idempotent.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;
    for def in ALL_TABLES {
        let sql = create_table_sql(&def, schema);
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(schema, tables = ALL_TABLES.len(), "migrations applied");
    Ok(())
}
