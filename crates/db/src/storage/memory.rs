//! Transient in-process backend.
//!
//! Each entity table is an insertion-ordered map plus its id counter,
//! guarded together by one `RwLock` so id assignment and insertion are a
//! single atomic step. Friend and like edges live as insertion-ordered id
//! sets on the owning record, which keeps `friends` and `common_friends`
//! output deterministic.

use async_trait::async_trait;
use cinetrack_core::error::CoreError;
use cinetrack_core::ranking;
use cinetrack_core::types::DbId;
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;

use crate::models::{CreateFilm, CreateUser, Film, Genre, Mpa, UpdateFilm, UpdateUser, User};
use crate::storage::{
    reference, Catalog, FilmStore, FriendGraph, LikeIndex, ReferenceStore, StoreResult, UserStore,
};

#[derive(Debug)]
struct UserRecord {
    user: User,
    friends: IndexSet<DbId>,
}

#[derive(Debug)]
struct FilmRecord {
    film: Film,
    likes: IndexSet<DbId>,
}

#[derive(Debug)]
struct Table<R> {
    next_id: DbId,
    rows: IndexMap<DbId, R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: IndexMap::new(),
        }
    }
}

impl<R> Table<R> {
    fn assign_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory catalog. Cheap to construct; state lives for the process.
pub struct MemoryCatalog {
    users: RwLock<Table<UserRecord>>,
    films: RwLock<Table<FilmRecord>>,
    genres: Vec<Genre>,
    mpa: Vec<Mpa>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Table::default()),
            films: RwLock::new(Table::default()),
            genres: reference::builtin_genres(),
            mpa: reference::builtin_mpa(),
        }
    }

    fn resolve_mpa(&self, id: DbId) -> StoreResult<Mpa> {
        self.mpa
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| CoreError::mpa_not_found(id).into())
    }

    fn resolve_genres(&self, ids: &[DbId]) -> StoreResult<Vec<Genre>> {
        ids.iter()
            .map(|&id| {
                self.genres
                    .iter()
                    .find(|g| g.id == id)
                    .cloned()
                    .ok_or_else(|| CoreError::genre_not_found(id).into())
            })
            .collect()
    }

    /// Assemble a `Film` from a create payload with references resolved.
    fn build_film(&self, id: DbId, new: &CreateFilm) -> StoreResult<Film> {
        let mpa = self.resolve_mpa(new.mpa.id)?;
        let genres = self.resolve_genres(&new.genre_ids())?;
        Ok(Film {
            id,
            name: new.name.clone(),
            description: new.description.clone(),
            release_date: new.release_date,
            duration: new.duration,
            mpa,
            genres,
        })
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryCatalog {
    async fn create_user(&self, new: CreateUser) -> StoreResult<User> {
        let mut table = self.users.write();
        let id = table.assign_id();
        let user = User {
            id,
            email: new.email.clone(),
            login: new.login.clone(),
            name: new.display_name(),
            birthday: new.birthday,
        };
        table.rows.insert(
            id,
            UserRecord {
                user: user.clone(),
                friends: IndexSet::new(),
            },
        );
        tracing::debug!(id, "user created");
        Ok(user)
    }

    async fn update_user(&self, update: UpdateUser) -> StoreResult<User> {
        let mut table = self.users.write();
        let Some(record) = table.rows.get_mut(&update.id) else {
            return Err(CoreError::user_not_found(update.id).into());
        };
        record.user = User {
            id: update.id,
            email: update.user.email.clone(),
            login: update.user.login.clone(),
            name: update.user.display_name(),
            birthday: update.user.birthday,
        };
        tracing::debug!(id = update.id, "user updated");
        Ok(record.user.clone())
    }

    async fn user(&self, id: DbId) -> StoreResult<User> {
        self.users
            .read()
            .rows
            .get(&id)
            .map(|r| r.user.clone())
            .ok_or_else(|| CoreError::user_not_found(id).into())
    }

    async fn users(&self) -> StoreResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .rows
            .values()
            .map(|r| r.user.clone())
            .collect())
    }

    async fn user_exists(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.users.read().rows.contains_key(&id))
    }
}

#[async_trait]
impl FilmStore for MemoryCatalog {
    async fn create_film(&self, new: CreateFilm) -> StoreResult<Film> {
        // Resolve references before touching the table so a bad id leaves
        // no partial state behind.
        let mut table = self.films.write();
        let id = table.next_id + 1;
        let film = self.build_film(id, &new)?;
        table.next_id = id;
        table.rows.insert(
            id,
            FilmRecord {
                film: film.clone(),
                likes: IndexSet::new(),
            },
        );
        tracing::debug!(id, "film created");
        Ok(film)
    }

    async fn update_film(&self, update: UpdateFilm) -> StoreResult<Film> {
        let film = self.build_film(update.id, &update.film)?;
        let mut table = self.films.write();
        let Some(record) = table.rows.get_mut(&update.id) else {
            return Err(CoreError::film_not_found(update.id).into());
        };
        record.film = film.clone();
        tracing::debug!(id = update.id, "film updated");
        Ok(film)
    }

    async fn film(&self, id: DbId) -> StoreResult<Film> {
        self.films
            .read()
            .rows
            .get(&id)
            .map(|r| r.film.clone())
            .ok_or_else(|| CoreError::film_not_found(id).into())
    }

    async fn films(&self) -> StoreResult<Vec<Film>> {
        Ok(self
            .films
            .read()
            .rows
            .values()
            .map(|r| r.film.clone())
            .collect())
    }

    async fn film_exists(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.films.read().rows.contains_key(&id))
    }
}

#[async_trait]
impl FriendGraph for MemoryCatalog {
    async fn add_friend(&self, user_id: DbId, friend_id: DbId) -> StoreResult<()> {
        let mut table = self.users.write();
        if !table.rows.contains_key(&user_id) {
            return Err(CoreError::user_not_found(user_id).into());
        }
        if !table.rows.contains_key(&friend_id) {
            return Err(CoreError::user_not_found(friend_id).into());
        }
        if let Some(record) = table.rows.get_mut(&user_id) {
            record.friends.insert(friend_id);
        }
        if let Some(record) = table.rows.get_mut(&friend_id) {
            record.friends.insert(user_id);
        }
        tracing::info!(user_id, friend_id, "friendship added");
        Ok(())
    }

    async fn remove_friend(&self, user_id: DbId, friend_id: DbId) -> StoreResult<()> {
        let mut table = self.users.write();
        if !table.rows.contains_key(&user_id) {
            return Err(CoreError::user_not_found(user_id).into());
        }
        if !table.rows.contains_key(&friend_id) {
            return Err(CoreError::user_not_found(friend_id).into());
        }
        if let Some(record) = table.rows.get_mut(&user_id) {
            record.friends.shift_remove(&friend_id);
        }
        if let Some(record) = table.rows.get_mut(&friend_id) {
            record.friends.shift_remove(&user_id);
        }
        tracing::info!(user_id, friend_id, "friendship removed");
        Ok(())
    }

    async fn friends(&self, user_id: DbId) -> StoreResult<Vec<User>> {
        let table = self.users.read();
        let Some(record) = table.rows.get(&user_id) else {
            return Err(CoreError::user_not_found(user_id).into());
        };
        Ok(record
            .friends
            .iter()
            .filter_map(|id| table.rows.get(id).map(|r| r.user.clone()))
            .collect())
    }

    async fn common_friends(&self, user_id: DbId, other_id: DbId) -> StoreResult<Vec<User>> {
        let table = self.users.read();
        let Some(record) = table.rows.get(&user_id) else {
            return Err(CoreError::user_not_found(user_id).into());
        };
        let Some(other) = table.rows.get(&other_id) else {
            return Err(CoreError::user_not_found(other_id).into());
        };
        Ok(record
            .friends
            .iter()
            .filter(|id| other.friends.contains(*id))
            .filter_map(|id| table.rows.get(id).map(|r| r.user.clone()))
            .collect())
    }
}

#[async_trait]
impl LikeIndex for MemoryCatalog {
    async fn add_like(&self, film_id: DbId, user_id: DbId) -> StoreResult<()> {
        if !self.users.read().rows.contains_key(&user_id) {
            return Err(CoreError::user_not_found(user_id).into());
        }
        let mut films = self.films.write();
        let Some(record) = films.rows.get_mut(&film_id) else {
            return Err(CoreError::film_not_found(film_id).into());
        };
        record.likes.insert(user_id);
        tracing::info!(film_id, user_id, "like added");
        Ok(())
    }

    async fn remove_like(&self, film_id: DbId, user_id: DbId) -> StoreResult<()> {
        if !self.users.read().rows.contains_key(&user_id) {
            return Err(CoreError::user_not_found(user_id).into());
        }
        let mut films = self.films.write();
        let Some(record) = films.rows.get_mut(&film_id) else {
            return Err(CoreError::film_not_found(film_id).into());
        };
        record.likes.shift_remove(&user_id);
        tracing::info!(film_id, user_id, "like removed");
        Ok(())
    }

    async fn popular_films(&self, count: usize) -> StoreResult<Vec<Film>> {
        let table = self.films.read();
        let counts: Vec<(DbId, usize)> = table
            .rows
            .iter()
            .map(|(&id, record)| (id, record.likes.len()))
            .collect();
        Ok(ranking::rank_by_engagement(&counts, count)
            .into_iter()
            .filter_map(|id| table.rows.get(&id).map(|r| r.film.clone()))
            .collect())
    }
}

#[async_trait]
impl ReferenceStore for MemoryCatalog {
    async fn genres(&self) -> StoreResult<Vec<Genre>> {
        Ok(self.genres.clone())
    }

    async fn genre(&self, id: DbId) -> StoreResult<Genre> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| CoreError::genre_not_found(id).into())
    }

    async fn mpa_ratings(&self) -> StoreResult<Vec<Mpa>> {
        Ok(self.mpa.clone())
    }

    async fn mpa(&self, id: DbId) -> StoreResult<Mpa> {
        self.resolve_mpa(id)
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn healthy(&self) -> bool {
        true
    }
}
