//! EntityStore: generic CRUD over one entity table using the SQL builder.

mod crud;
mod outcome;
pub use crud::EntityStore;
pub use outcome::Outcome;
