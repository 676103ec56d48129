use super::{Column, Entity, EntityQuery, TableDef};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A product in a category. `price` is kept as text exactly as the client sent it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i32,
    pub reference: String,
    pub name: String,
    pub category_id: i32,
    pub price: String,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ProductPatch {
    pub reference: Option<String>,
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub price: Option<String>,
}

impl Entity for Product {
    type Patch = ProductPatch;

    const TABLE: TableDef = TableDef {
        entity_name: "Product",
        table: "product",
        path_segment: "products",
        columns: &[
            Column::id(),
            Column::text("reference"),
            Column::text("name"),
            Column::foreign_key("category_id", "product_category"),
            Column::text("price"),
        ],
    };

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_fields<'q>(&'q self, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query
            .bind(&self.reference)
            .bind(&self.name)
            .bind(self.category_id)
            .bind(&self.price)
    }

    fn bind_patch<'q>(patch: &'q ProductPatch, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query
            .bind(&patch.reference)
            .bind(&patch.name)
            .bind(patch.category_id)
            .bind(&patch.price)
    }
}
