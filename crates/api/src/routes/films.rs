use axum::routing::{get, put};
use axum::Router;

use crate::handlers::film;
use crate::state::AppState;

/// Routes mounted at `/films`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(film::list).post(film::create).put(film::update))
        .route("/popular", get(film::popular))
        .route("/{id}", get(film::get_by_id))
        .route(
            "/{id}/like/{user_id}",
            put(film::add_like).delete(film::remove_like),
        )
}
