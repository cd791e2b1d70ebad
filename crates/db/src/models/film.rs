//! Film entity model and DTOs.

use cinetrack_core::error::{CoreError, CoreResult};
use cinetrack_core::types::{Date, DbId};
use cinetrack_core::validation;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::genre::{Genre, GenreRef};
use crate::models::mpa::{Mpa, MpaRef};

/// A film with its rating and genre references resolved.
///
/// Not a direct row mapping: the `films` table stores `mpa_id` and the
/// genre set lives in `film_genres`, so backends assemble this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub release_date: Date,
    /// Running time in minutes.
    pub duration: i32,
    pub mpa: Mpa,
    /// Resolved genres, deduplicated and ordered by id.
    pub genres: Vec<Genre>,
}

/// DTO for creating a new film. Carries no id; the store assigns one.
///
/// Rating and genres are referenced by id and resolved by the store
/// (`{"mpa": {"id": 1}, "genres": [{"id": 2}]}` on the wire).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFilm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(max = 200))]
    pub description: String,
    pub release_date: Date,
    #[validate(range(min = 1))]
    pub duration: i32,
    pub mpa: MpaRef,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
}

impl CreateFilm {
    /// Structural checks plus the domain date rule.
    pub fn validate_payload(&self) -> CoreResult<()> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "film name must not be blank".to_string(),
            ));
        }
        validation::check_release_date(self.release_date)
    }

    /// Genre ids deduplicated and sorted, ready for association writes.
    pub fn genre_ids(&self) -> Vec<DbId> {
        let mut ids: Vec<DbId> = self.genres.iter().map(|g| g.id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// DTO for a full-replace update. The id must reference an existing film.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFilm {
    pub id: DbId,
    #[serde(flatten)]
    pub film: CreateFilm,
}
