//! Handlers for the `/films` resource: CRUD, likes, and the popularity
//! ranking.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cinetrack_core::types::DbId;
use cinetrack_db::models::{CreateFilm, Film, UpdateFilm};
use cinetrack_db::storage::{FilmStore, LikeIndex};
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /films
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Film>>> {
    let films = state.catalog.films().await?;
    Ok(Json(films))
}

/// POST /films
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFilm>,
) -> AppResult<(StatusCode, Json<Film>)> {
    input.validate_payload()?;
    let film = state.catalog.create_film(input).await?;
    Ok((StatusCode::CREATED, Json(film)))
}

/// PUT /films (full replace by id in the body)
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<UpdateFilm>,
) -> AppResult<Json<Film>> {
    input.film.validate_payload()?;
    let film = state.catalog.update_film(input).await?;
    Ok(Json(film))
}

/// GET /films/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Film>> {
    let film = state.catalog.film(id).await?;
    Ok(Json(film))
}

/// PUT /films/{id}/like/{user_id}
pub async fn add_like(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.catalog.add_like(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /films/{id}/like/{user_id}
pub async fn remove_like(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.catalog.remove_like(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    10
}

/// GET /films/popular?count=N (default 10)
pub async fn popular(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> AppResult<Json<Vec<Film>>> {
    let films = state.catalog.popular_films(params.count).await?;
    Ok(Json(films))
}
