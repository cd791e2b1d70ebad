//! Persistent PostgreSQL backend.
//!
//! Queries use the shared column lists and `query_as` mapping. Any logical
//! operation spanning multiple statements (film row + genre associations,
//! the two directed friendship rows) runs inside one transaction.

use async_trait::async_trait;
use cinetrack_core::error::CoreError;
use cinetrack_core::types::{Date, DbId};
use sqlx::{FromRow, PgPool};

use crate::models::{CreateFilm, CreateUser, Film, Genre, Mpa, UpdateFilm, UpdateUser, User};
use crate::storage::{
    Catalog, FilmStore, FriendGraph, LikeIndex, ReferenceStore, StoreResult, UserStore,
};

/// Column lists shared across queries to avoid repetition.
const USER_COLUMNS: &str = "id, email, login, name, birthday";
const FILM_COLUMNS: &str = "id, name, description, release_date, duration, mpa_id";

/// Raw `films` row; the rating and genre set are resolved separately.
#[derive(Debug, FromRow)]
struct FilmRow {
    id: DbId,
    name: String,
    description: String,
    release_date: Date,
    duration: i32,
    mpa_id: DbId,
}

/// Postgres-backed catalog over a shared connection pool.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn assert_user(&self, id: DbId) -> StoreResult<()> {
        if self.user_exists(id).await? {
            Ok(())
        } else {
            Err(CoreError::user_not_found(id).into())
        }
    }

    async fn assert_film(&self, id: DbId) -> StoreResult<()> {
        if self.film_exists(id).await? {
            Ok(())
        } else {
            Err(CoreError::film_not_found(id).into())
        }
    }

    /// Check that every referenced genre exists, so a bad id surfaces as
    /// `NotFound` instead of a foreign-key violation.
    async fn assert_genres(&self, ids: &[DbId]) -> StoreResult<()> {
        for &id in ids {
            self.genre(id).await?;
        }
        Ok(())
    }

    /// Resolve rating and genres for a raw film row.
    async fn hydrate(&self, row: FilmRow) -> StoreResult<Film> {
        let mpa = self.mpa(row.mpa_id).await?;
        let genres = sqlx::query_as::<_, Genre>(
            "SELECT g.id, g.name FROM genres g
             JOIN film_genres fg ON fg.id_genre = g.id
             WHERE fg.id_film = $1
             ORDER BY g.id",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Film {
            id: row.id,
            name: row.name,
            description: row.description,
            release_date: row.release_date,
            duration: row.duration,
            mpa,
            genres,
        })
    }
}

#[async_trait]
impl UserStore for PgCatalog {
    async fn create_user(&self, new: CreateUser) -> StoreResult<User> {
        let query = format!(
            "INSERT INTO users (email, login, name, birthday)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&new.email)
            .bind(&new.login)
            .bind(new.display_name())
            .bind(new.birthday)
            .fetch_one(&self.pool)
            .await?;
        tracing::debug!(id = user.id, "user created");
        Ok(user)
    }

    async fn update_user(&self, update: UpdateUser) -> StoreResult<User> {
        let query = format!(
            "UPDATE users SET email = $2, login = $3, name = $4, birthday = $5
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(update.id)
            .bind(&update.user.email)
            .bind(&update.user.login)
            .bind(update.user.display_name())
            .bind(update.user.birthday)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(CoreError::user_not_found(update.id))?;
        tracing::debug!(id = user.id, "user updated");
        Ok(user)
    }

    async fn user(&self, id: DbId) -> StoreResult<User> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| CoreError::user_not_found(id).into())
    }

    async fn users(&self) -> StoreResult<Vec<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
        Ok(sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn user_exists(&self, id: DbId) -> StoreResult<bool> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl FilmStore for PgCatalog {
    async fn create_film(&self, new: CreateFilm) -> StoreResult<Film> {
        // Resolve references up front so a bad id fails before any write.
        self.mpa(new.mpa.id).await?;
        let genre_ids = new.genre_ids();
        self.assert_genres(&genre_ids).await?;

        let mut tx = self.pool.begin().await?;
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO films (name, description, release_date, duration, mpa_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.release_date)
        .bind(new.duration)
        .bind(new.mpa.id)
        .fetch_one(&mut *tx)
        .await?;

        for genre_id in &genre_ids {
            sqlx::query(
                "INSERT INTO film_genres (id_film, id_genre) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(genre_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(id, "film created");
        self.film(id).await
    }

    async fn update_film(&self, update: UpdateFilm) -> StoreResult<Film> {
        self.assert_film(update.id).await?;
        self.mpa(update.film.mpa.id).await?;
        let genre_ids = update.film.genre_ids();
        self.assert_genres(&genre_ids).await?;

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "UPDATE films SET name = $2, description = $3, release_date = $4,
                    duration = $5, mpa_id = $6
             WHERE id = $1",
        )
        .bind(update.id)
        .bind(&update.film.name)
        .bind(&update.film.description)
        .bind(update.film.release_date)
        .bind(update.film.duration)
        .bind(update.film.mpa.id)
        .execute(&mut *tx)
        .await?;

        // Full-replace semantics extend to the genre set.
        sqlx::query("DELETE FROM film_genres WHERE id_film = $1")
            .bind(update.id)
            .execute(&mut *tx)
            .await?;
        for genre_id in &genre_ids {
            sqlx::query("INSERT INTO film_genres (id_film, id_genre) VALUES ($1, $2)")
                .bind(update.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::debug!(id = update.id, "film updated");
        self.film(update.id).await
    }

    async fn film(&self, id: DbId) -> StoreResult<Film> {
        let query = format!("SELECT {FILM_COLUMNS} FROM films WHERE id = $1");
        let row = sqlx::query_as::<_, FilmRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(CoreError::film_not_found(id))?;
        self.hydrate(row).await
    }

    async fn films(&self) -> StoreResult<Vec<Film>> {
        let query = format!("SELECT {FILM_COLUMNS} FROM films ORDER BY id");
        let rows = sqlx::query_as::<_, FilmRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        let mut films = Vec::with_capacity(rows.len());
        for row in rows {
            films.push(self.hydrate(row).await?);
        }
        Ok(films)
    }

    async fn film_exists(&self, id: DbId) -> StoreResult<bool> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM films WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl FriendGraph for PgCatalog {
    async fn add_friend(&self, user_id: DbId, friend_id: DbId) -> StoreResult<()> {
        self.assert_user(user_id).await?;
        self.assert_user(friend_id).await?;

        // Symmetric write: both directed rows, one transaction.
        let mut tx = self.pool.begin().await?;
        for (a, b) in [(user_id, friend_id), (friend_id, user_id)] {
            sqlx::query(
                "INSERT INTO friends (id_user, id_friend) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(a)
            .bind(b)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::info!(user_id, friend_id, "friendship added");
        Ok(())
    }

    async fn remove_friend(&self, user_id: DbId, friend_id: DbId) -> StoreResult<()> {
        self.assert_user(user_id).await?;
        self.assert_user(friend_id).await?;

        let mut tx = self.pool.begin().await?;
        for (a, b) in [(user_id, friend_id), (friend_id, user_id)] {
            sqlx::query("DELETE FROM friends WHERE id_user = $1 AND id_friend = $2")
                .bind(a)
                .bind(b)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::info!(user_id, friend_id, "friendship removed");
        Ok(())
    }

    async fn friends(&self, user_id: DbId) -> StoreResult<Vec<User>> {
        self.assert_user(user_id).await?;

        Ok(sqlx::query_as::<_, User>(
            "SELECT u.id, u.email, u.login, u.name, u.birthday
             FROM users u
             JOIN friends f ON u.id = f.id_friend
             WHERE f.id_user = $1
             ORDER BY f.seq",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn common_friends(&self, user_id: DbId, other_id: DbId) -> StoreResult<Vec<User>> {
        self.assert_user(user_id).await?;
        self.assert_user(other_id).await?;

        Ok(sqlx::query_as::<_, User>(
            "SELECT u.id, u.email, u.login, u.name, u.birthday
             FROM users u
             JOIN friends f ON u.id = f.id_friend AND f.id_user = $1
             JOIN friends o ON u.id = o.id_friend AND o.id_user = $2
             ORDER BY f.seq",
        )
        .bind(user_id)
        .bind(other_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl LikeIndex for PgCatalog {
    async fn add_like(&self, film_id: DbId, user_id: DbId) -> StoreResult<()> {
        self.assert_film(film_id).await?;
        self.assert_user(user_id).await?;

        sqlx::query(
            "INSERT INTO likes_by_users (id_film, id_user) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(film_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        tracing::info!(film_id, user_id, "like added");
        Ok(())
    }

    async fn remove_like(&self, film_id: DbId, user_id: DbId) -> StoreResult<()> {
        self.assert_film(film_id).await?;
        self.assert_user(user_id).await?;

        sqlx::query("DELETE FROM likes_by_users WHERE id_film = $1 AND id_user = $2")
            .bind(film_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(film_id, user_id, "like removed");
        Ok(())
    }

    async fn popular_films(&self, count: usize) -> StoreResult<Vec<Film>> {
        // One total order covers both ranking phases: liked films sort by
        // count descending (ties by id), unliked films follow in id order.
        let ids: Vec<DbId> = sqlx::query_scalar(
            "SELECT f.id
             FROM films f
             LEFT JOIN likes_by_users l ON f.id = l.id_film
             GROUP BY f.id
             ORDER BY COUNT(l.id_user) DESC, f.id ASC
             LIMIT $1",
        )
        .bind(count as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut films = Vec::with_capacity(ids.len());
        for id in ids {
            films.push(self.film(id).await?);
        }
        Ok(films)
    }
}

#[async_trait]
impl ReferenceStore for PgCatalog {
    async fn genres(&self) -> StoreResult<Vec<Genre>> {
        Ok(
            sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn genre(&self, id: DbId) -> StoreResult<Genre> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| CoreError::genre_not_found(id).into())
    }

    async fn mpa_ratings(&self) -> StoreResult<Vec<Mpa>> {
        Ok(
            sqlx::query_as::<_, Mpa>("SELECT id, name, description FROM mpa ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn mpa(&self, id: DbId) -> StoreResult<Mpa> {
        sqlx::query_as::<_, Mpa>("SELECT id, name, description FROM mpa WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| CoreError::mpa_not_found(id).into())
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn healthy(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }
}
