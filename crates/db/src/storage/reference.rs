//! Built-in reference tables for the in-memory backend.
//!
//! Mirrors the migration seed (`0002_reference_data.sql`) so both backends
//! serve identical MPA ratings and genres.

use crate::models::{Genre, Mpa};

pub fn builtin_mpa() -> Vec<Mpa> {
    [
        (1, "G", "No age restrictions"),
        (2, "PG", "Parental guidance suggested"),
        (3, "PG-13", "Not recommended under 13"),
        (4, "R", "Under 17 requires an accompanying adult"),
        (5, "NC-17", "No one 17 and under admitted"),
    ]
    .into_iter()
    .map(|(id, name, description)| Mpa {
        id,
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

pub fn builtin_genres() -> Vec<Genre> {
    [
        (1, "Comedy"),
        (2, "Drama"),
        (3, "Cartoon"),
        (4, "Thriller"),
        (5, "Documentary"),
        (6, "Action"),
    ]
    .into_iter()
    .map(|(id, name)| Genre {
        id,
        name: name.to_string(),
    })
    .collect()
}
