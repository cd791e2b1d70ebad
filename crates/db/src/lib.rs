//! Storage layer for Cinetrack.
//!
//! Exposes the entity and DTO models, the storage contract ([`Catalog`] and
//! its component traits), and the two backends that satisfy it: the
//! transient [`storage::memory::MemoryCatalog`] and the persistent
//! [`storage::postgres::PgCatalog`].

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod storage;

pub use storage::{Catalog, DynCatalog, StoreError, StoreResult};

/// Alias so downstream crates don't name sqlx types directly.
pub type DbPool = sqlx::PgPool;

/// Create a connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by startup and the health endpoint.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Apply all embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
