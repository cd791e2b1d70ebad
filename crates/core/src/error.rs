use crate::types::DbId;

/// Domain-level error type shared by all storage backends and services.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Supplied data failed a domain validation rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for fallible domain operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Shorthand for a film-not-found error.
    pub fn film_not_found(id: DbId) -> Self {
        CoreError::NotFound { entity: "Film", id }
    }

    /// Shorthand for a user-not-found error.
    pub fn user_not_found(id: DbId) -> Self {
        CoreError::NotFound { entity: "User", id }
    }

    /// Shorthand for a genre-not-found error.
    pub fn genre_not_found(id: DbId) -> Self {
        CoreError::NotFound { entity: "Genre", id }
    }

    /// Shorthand for an MPA-rating-not-found error.
    pub fn mpa_not_found(id: DbId) -> Self {
        CoreError::NotFound { entity: "MPA rating", id }
    }
}
