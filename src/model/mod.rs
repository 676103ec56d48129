//! Entity descriptors and record types.
//!
//! Each entity is:
//! - a `FromRow` + `Serialize` + `Deserialize` record matching the table row (also the create/replace body)
//! - a `Deserialize` patch (all `Option` fields) for partial updates
//! - a [`TableDef`] naming its table, route segment and columns, used by the SQL builder and migrations

use serde::{de::DeserializeOwned, Serialize};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

mod country;
mod customer;
mod installation;
mod product;
mod product_category;

pub use country::{Country, CountryPatch};
pub use customer::{Customer, CustomerPatch};
pub use installation::{Installation, InstallationPatch};
pub use product::{Product, ProductPatch};
pub use product_category::{ProductCategory, ProductCategoryPatch};

/// Query decoding rows into `E`, with parameters bound in order.
pub type EntityQuery<'q, E> = QueryAs<'q, Postgres, E, PgArguments>;

/// Name of the identifier column. Always the first column of a [`TableDef`].
pub const ID_COLUMN: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    /// PostgreSQL type used in DDL.
    pub pg_type: &'static str,
    /// Referenced table (by its `id` column) for foreign keys.
    pub references: Option<&'static str>,
}

impl Column {
    pub const fn id() -> Self {
        Column { name: ID_COLUMN, pg_type: "INTEGER", references: None }
    }

    pub const fn text(name: &'static str) -> Self {
        Column { name, pg_type: "TEXT", references: None }
    }

    pub const fn date(name: &'static str) -> Self {
        Column { name, pg_type: "DATE", references: None }
    }

    pub const fn foreign_key(name: &'static str, table: &'static str) -> Self {
        Column { name, pg_type: "INTEGER", references: Some(table) }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TableDef {
    /// Human-readable name used in error messages ("Product category").
    pub entity_name: &'static str,
    pub table: &'static str,
    /// Route segment under `/v1` ("product_categories").
    pub path_segment: &'static str,
    /// Identifier column first, then data columns in bind order.
    pub columns: &'static [Column],
}

impl TableDef {
    /// Every column except the identifier.
    pub fn data_columns(&self) -> &'static [Column] {
        &self.columns[1..]
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|c| c.name)
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.entity_name)
    }

    pub fn conflict_message(&self, id: i32) -> String {
        format!("{} with id {} already exists.", self.entity_name, id)
    }
}

/// A record type with a client-assigned integer id, stored in one table.
///
/// `bind_fields` and `bind_patch` must bind exactly the data columns of
/// [`Entity::TABLE`], in order; the store binds the id as `$1` beforehand.
pub trait Entity:
    for<'r> FromRow<'r, PgRow> + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    type Patch: DeserializeOwned + Send + Sync + 'static;

    const TABLE: TableDef;

    fn id(&self) -> i32;

    fn bind_fields<'q>(&'q self, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self>;

    /// Absent patch fields bind as NULL.
    fn bind_patch<'q>(patch: &'q Self::Patch, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self>;
}

/// Tables in foreign-key dependency order.
pub const ALL_TABLES: [TableDef; 5] = [
    Country::TABLE,
    ProductCategory::TABLE,
    Product::TABLE,
    Customer::TABLE,
    Installation::TABLE,
];
