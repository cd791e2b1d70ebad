//! Read-only handlers for the `/mpa` reference resource.

use axum::extract::{Path, State};
use axum::Json;
use cinetrack_core::types::DbId;
use cinetrack_db::models::Mpa;
use cinetrack_db::storage::ReferenceStore;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /mpa
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Mpa>>> {
    let ratings = state.catalog.mpa_ratings().await?;
    Ok(Json(ratings))
}

/// GET /mpa/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Mpa>> {
    let rating = state.catalog.mpa(id).await?;
    Ok(Json(rating))
}
