use super::{Column, Entity, EntityQuery, TableDef};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `premium_customer` is a free-form flag string, not a boolean.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub country_id: i32,
    pub premium_customer: String,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub country_id: Option<i32>,
    pub premium_customer: Option<String>,
}

impl Entity for Customer {
    type Patch = CustomerPatch;

    const TABLE: TableDef = TableDef {
        entity_name: "Customer",
        table: "customer",
        path_segment: "customers",
        columns: &[
            Column::id(),
            Column::text("name"),
            Column::text("email"),
            Column::foreign_key("country_id", "country"),
            Column::text("premium_customer"),
        ],
    };

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_fields<'q>(&'q self, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query
            .bind(&self.name)
            .bind(&self.email)
            .bind(self.country_id)
            .bind(&self.premium_customer)
    }

    fn bind_patch<'q>(patch: &'q CustomerPatch, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query
            .bind(&patch.name)
            .bind(&patch.email)
            .bind(patch.country_id)
            .bind(&patch.premium_customer)
    }
}
