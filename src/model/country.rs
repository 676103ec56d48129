use super::{Column, Entity, EntityQuery, TableDef};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub region: String,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CountryPatch {
    pub name: Option<String>,
    pub region: Option<String>,
}

impl Entity for Country {
    type Patch = CountryPatch;

    const TABLE: TableDef = TableDef {
        entity_name: "Country",
        table: "country",
        path_segment: "countries",
        columns: &[Column::id(), Column::text("name"), Column::text("region")],
    };

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_fields<'q>(&'q self, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query.bind(&self.name).bind(&self.region)
    }

    fn bind_patch<'q>(patch: &'q CountryPatch, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query.bind(&patch.name).bind(&patch.region)
    }
}
