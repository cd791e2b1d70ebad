//! Storage contract and backends.
//!
//! One capability set, two implementations selected once at process
//! composition time: [`memory::MemoryCatalog`] (transient, in-process) and
//! [`postgres::PgCatalog`] (persistent). Both must satisfy the same
//! observable behavior; the db test suites assert the shared property list
//! against each.

use std::sync::Arc;

use async_trait::async_trait;
use cinetrack_core::error::CoreError;
use cinetrack_core::types::DbId;

use crate::models::{CreateFilm, CreateUser, Film, Genre, Mpa, UpdateFilm, UpdateUser, User};

pub mod memory;
pub mod postgres;
pub mod reference;

/// Errors surfaced by storage backends.
///
/// Domain outcomes (`NotFound`, `Validation`, `Conflict`) travel as
/// [`CoreError`]; backend faults travel as the sqlx variant and are
/// classified at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Identity and persistence of user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Assign a fresh id and persist the user.
    async fn create_user(&self, new: CreateUser) -> StoreResult<User>;

    /// Full-replace an existing user; `NotFound` if the id is absent.
    async fn update_user(&self, update: UpdateUser) -> StoreResult<User>;

    async fn user(&self, id: DbId) -> StoreResult<User>;

    async fn users(&self) -> StoreResult<Vec<User>>;

    /// Existence guard: id-presence check without materializing the entity.
    async fn user_exists(&self, id: DbId) -> StoreResult<bool>;
}

/// Identity and persistence of film records, with rating and genre
/// references resolved on every read.
#[async_trait]
pub trait FilmStore: Send + Sync {
    /// Assign a fresh id, persist the film and its genre associations.
    async fn create_film(&self, new: CreateFilm) -> StoreResult<Film>;

    /// Full-replace an existing film; `NotFound` if the id is absent.
    async fn update_film(&self, update: UpdateFilm) -> StoreResult<Film>;

    async fn film(&self, id: DbId) -> StoreResult<Film>;

    async fn films(&self) -> StoreResult<Vec<Film>>;

    /// Existence guard: id-presence check without materializing the entity.
    async fn film_exists(&self, id: DbId) -> StoreResult<bool>;
}

/// The undirected friendship relation between users.
///
/// Every mutation asserts both endpoints exist. The observable relation is
/// symmetric: after `add_friend(a, b)`, `friends(a)` contains `b` and
/// `friends(b)` contains `a`. Removal is unconditional and mutual.
#[async_trait]
pub trait FriendGraph: Send + Sync {
    async fn add_friend(&self, user_id: DbId, friend_id: DbId) -> StoreResult<()>;

    async fn remove_friend(&self, user_id: DbId, friend_id: DbId) -> StoreResult<()>;

    /// Resolved friends of `user_id`, in edge insertion order.
    async fn friends(&self, user_id: DbId) -> StoreResult<Vec<User>>;

    /// Intersection of the two friend sets, ordered by `user_id`'s edge
    /// insertion order.
    async fn common_friends(&self, user_id: DbId, other_id: DbId) -> StoreResult<Vec<User>>;
}

/// The like relation between users and films, and the popularity ranking
/// derived from it.
#[async_trait]
pub trait LikeIndex: Send + Sync {
    /// Insert the edge if absent; adding twice is a no-op.
    async fn add_like(&self, film_id: DbId, user_id: DbId) -> StoreResult<()>;

    /// Remove the edge if present; removing an absent edge is a no-op.
    async fn remove_like(&self, film_id: DbId, user_id: DbId) -> StoreResult<()>;

    /// Top `count` films: like count descending, ties by id ascending,
    /// padded with zero-like films in id order.
    async fn popular_films(&self, count: usize) -> StoreResult<Vec<Film>>;
}

/// Read-only lookups for the immutable reference entities.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    async fn genres(&self) -> StoreResult<Vec<Genre>>;

    async fn genre(&self, id: DbId) -> StoreResult<Genre>;

    async fn mpa_ratings(&self) -> StoreResult<Vec<Mpa>>;

    async fn mpa(&self, id: DbId) -> StoreResult<Mpa>;
}

/// Full storage capability set, selected once at composition time.
#[async_trait]
pub trait Catalog:
    UserStore + FilmStore + FriendGraph + LikeIndex + ReferenceStore
{
    /// Backend name for health reporting and startup logs.
    fn backend_name(&self) -> &'static str;

    /// Liveness probe for the health endpoint.
    async fn healthy(&self) -> bool;
}

/// Shared handle to whichever backend the process composed.
pub type DynCatalog = Arc<dyn Catalog>;
