use cinetrack_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A genre reference entity. Immutable, seeded by migration.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
}

/// Wire-shape reference to a genre by id only (`{"id": 2}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRef {
    pub id: DbId,
}
