//! Read-only handlers for the `/genres` reference resource.

use axum::extract::{Path, State};
use axum::Json;
use cinetrack_core::types::DbId;
use cinetrack_db::models::Genre;
use cinetrack_db::storage::ReferenceStore;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /genres
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.catalog.genres().await?;
    Ok(Json(genres))
}

/// GET /genres/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Genre>> {
    let genre = state.catalog.genre(id).await?;
    Ok(Json(genre))
}
