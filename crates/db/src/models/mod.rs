//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct as stored and returned by the catalog
//! - A `Deserialize` create DTO for inserts (never carries an id)
//! - A `Deserialize` update DTO (full replace, id required)

pub mod film;
pub mod genre;
pub mod mpa;
pub mod user;

pub use film::{CreateFilm, Film, UpdateFilm};
pub use genre::{Genre, GenreRef};
pub use mpa::{Mpa, MpaRef};
pub use user::{CreateUser, UpdateUser, User};
