//! Entity CRUD routes under `/v1`, one uniform set per entity.

use crate::handlers::entity::{create, delete, list, merge, read, replace};
use crate::model::{Country, Customer, Entity, Installation, Product, ProductCategory};
use crate::state::AppState;
use axum::{routing::get, Router};

/// `/{segment}` and `/{segment}/` (GET list, POST create) and
/// `/{segment}/:id` (GET, PUT, PATCH, DELETE).
pub fn routes_for<E: Entity>() -> Router<AppState> {
    let collection = format!("/{}", E::TABLE.path_segment);
    let item = format!("/{}/:id", E::TABLE.path_segment);
    Router::new()
        .route(&collection, get(list::<E>).post(create::<E>))
        .route(&format!("{}/", collection), get(list::<E>).post(create::<E>))
        .route(
            &item,
            get(read::<E>)
                .put(replace::<E>)
                .patch(merge::<E>)
                .delete(delete::<E>),
        )
}

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .merge(routes_for::<Country>())
        .merge(routes_for::<Customer>())
        .merge(routes_for::<ProductCategory>())
        .merge(routes_for::<Product>())
        .merge(routes_for::<Installation>())
        .with_state(state)
}
