use axum::routing::get;
use axum::Router;

use crate::handlers::genre;
use crate::state::AppState;

/// Routes mounted at `/genres`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(genre::list))
        .route("/{id}", get(genre::get_by_id))
}
