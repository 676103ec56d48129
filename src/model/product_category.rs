use super::{Column, Entity, EntityQuery, TableDef};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ProductCategory {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ProductCategoryPatch {
    pub name: Option<String>,
}

impl Entity for ProductCategory {
    type Patch = ProductCategoryPatch;

    const TABLE: TableDef = TableDef {
        entity_name: "Product category",
        table: "product_category",
        path_segment: "product_categories",
        columns: &[Column::id(), Column::text("name")],
    };

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_fields<'q>(&'q self, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query.bind(&self.name)
    }

    fn bind_patch<'q>(
        patch: &'q ProductCategoryPatch,
        query: EntityQuery<'q, Self>,
    ) -> EntityQuery<'q, Self> {
        query.bind(&patch.name)
    }
}
