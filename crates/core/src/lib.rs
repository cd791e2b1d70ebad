//! Domain primitives shared by every layer of Cinetrack.
//!
//! This crate is storage- and transport-agnostic: it knows nothing about
//! sqlx or axum. It owns the id/timestamp aliases, the domain error enum,
//! the popularity-ranking policy, and the field-validation rules.

pub mod error;
pub mod ranking;
pub mod types;
pub mod validation;
