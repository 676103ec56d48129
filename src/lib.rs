//! Installbase API: REST CRUD for countries, customers, products, product
//! categories and installations on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Country, Customer, Entity, Installation, Product, ProductCategory};
pub use routes::{app, common_routes, entity_routes};
pub use service::{EntityStore, Outcome};
pub use state::AppState;
pub use store::ensure_database_exists;
