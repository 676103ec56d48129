use super::{Column, Entity, EntityQuery, TableDef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A product installed at a customer on a given day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Installation {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub product_id: i32,
    pub customer_id: i32,
    pub installation_date: NaiveDate,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct InstallationPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub product_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub installation_date: Option<NaiveDate>,
}

impl Entity for Installation {
    type Patch = InstallationPatch;

    const TABLE: TableDef = TableDef {
        entity_name: "Installation",
        table: "installation",
        path_segment: "installations",
        columns: &[
            Column::id(),
            Column::text("name"),
            Column::text("description"),
            Column::foreign_key("product_id", "product"),
            Column::foreign_key("customer_id", "customer"),
            Column::date("installation_date"),
        ],
    };

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_fields<'q>(&'q self, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.product_id)
            .bind(self.customer_id)
            .bind(self.installation_date)
    }

    fn bind_patch<'q>(
        patch: &'q InstallationPatch,
        query: EntityQuery<'q, Self>,
    ) -> EntityQuery<'q, Self> {
        query
            .bind(&patch.name)
            .bind(&patch.description)
            .bind(patch.product_id)
            .bind(patch.customer_id)
            .bind(patch.installation_date)
    }
}
