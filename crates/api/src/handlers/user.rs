//! Handlers for the `/users` resource: CRUD and the friendship graph.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cinetrack_core::types::DbId;
use cinetrack_db::models::{CreateUser, UpdateUser, User};
use cinetrack_db::storage::{FriendGraph, UserStore};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.catalog.users().await?;
    Ok(Json(users))
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.validate_payload()?;
    let user = state.catalog.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users (full replace by id in the body)
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    input.user.validate_payload()?;
    let user = state.catalog.update_user(input).await?;
    Ok(Json(user))
}

/// GET /users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = state.catalog.user(id).await?;
    Ok(Json(user))
}

/// PUT /users/{id}/friends/{friend_id}
pub async fn add_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.catalog.add_friend(id, friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/{id}/friends/{friend_id}
pub async fn remove_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.catalog.remove_friend(id, friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/{id}/friends
pub async fn friends(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<User>>> {
    let friends = state.catalog.friends(id).await?;
    Ok(Json(friends))
}

/// GET /users/{id}/friends/common/{other_id}
pub async fn common_friends(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Vec<User>>> {
    let friends = state.catalog.common_friends(id, other_id).await?;
    Ok(Json(friends))
}
