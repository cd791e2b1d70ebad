//! Request handlers, one module per resource.

pub mod film;
pub mod genre;
pub mod mpa;
pub mod user;
