use axum::routing::{get, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list).post(user::create).put(user::update))
        .route("/{id}", get(user::get_by_id))
        .route("/{id}/friends", get(user::friends))
        .route("/{id}/friends/common/{other_id}", get(user::common_friends))
        .route(
            "/{id}/friends/{friend_id}",
            put(user::add_friend).delete(user::remove_friend),
        )
}
