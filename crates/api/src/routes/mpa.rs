use axum::routing::get;
use axum::Router;

use crate::handlers::mpa;
use crate::state::AppState;

/// Routes mounted at `/mpa`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mpa::list))
        .route("/{id}", get(mpa::get_by_id))
}
