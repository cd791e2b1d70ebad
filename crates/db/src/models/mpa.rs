use cinetrack_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An MPA content-classification rating. Immutable, seeded by migration.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Mpa {
    pub id: DbId,
    pub name: String,
    pub description: String,
}

/// Wire-shape reference to a rating by id only (`{"id": 1}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpaRef {
    pub id: DbId,
}
