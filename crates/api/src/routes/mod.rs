pub mod films;
pub mod genres;
pub mod health;
pub mod mpa;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the root route tree.
///
/// Route hierarchy:
///
/// ```text
/// /films                                  list, create, update
/// /films/popular?count=N                  ranked list (default 10)
/// /films/{id}                             get
/// /films/{id}/like/{user_id}              add like (PUT), remove like (DELETE)
///
/// /users                                  list, create, update
/// /users/{id}                             get
/// /users/{id}/friends                     friend list
/// /users/{id}/friends/common/{other_id}   common friends
/// /users/{id}/friends/{friend_id}         add friend (PUT), remove friend (DELETE)
///
/// /genres, /genres/{id}                   reference lookups
/// /mpa, /mpa/{id}                         reference lookups
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/films", films::router())
        .nest("/users", users::router())
        .nest("/genres", genres::router())
        .nest("/mpa", mpa::router())
}
