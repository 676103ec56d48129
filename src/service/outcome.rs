//! Expected, non-fault results of a store operation.

use crate::error::AppError;
use crate::model::TableDef;

/// Result of a single-row store operation. Infrastructure faults travel
/// separately as `Err(AppError)`.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    /// No row with the requested id.
    NotFound,
    /// Create hit an id that is already in use; nothing was written.
    Conflict,
}

impl<T> Outcome<T> {
    /// Map NotFound/Conflict to the entity's client-facing error.
    pub fn into_result(self, def: &TableDef, id: i32) -> Result<T, AppError> {
        match self {
            Outcome::Done(v) => Ok(v),
            Outcome::NotFound => Err(AppError::NotFound(def.not_found_message())),
            Outcome::Conflict => Err(AppError::Conflict(def.conflict_message(id))),
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(row: Option<T>) -> Self {
        row.map_or(Outcome::NotFound, Outcome::Done)
    }
}
