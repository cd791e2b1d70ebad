//! Property suite for the transient backend.
//!
//! Exercises the full catalog contract: identity, existence guards,
//! friendship symmetry, like idempotence, and the ranked-then-fallback
//! popularity ordering. The Postgres suite asserts the same properties.

use chrono::NaiveDate;
use cinetrack_core::error::CoreError;
use cinetrack_db::models::{CreateFilm, CreateUser, GenreRef, MpaRef, UpdateFilm, UpdateUser};
use cinetrack_db::storage::memory::MemoryCatalog;
use cinetrack_db::storage::{FilmStore, FriendGraph, LikeIndex, ReferenceStore, UserStore};
use cinetrack_db::StoreError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(login: &str) -> CreateUser {
    CreateUser {
        email: format!("{login}@example.com"),
        login: login.to_string(),
        name: None,
        birthday: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
    }
}

fn new_film(name: &str) -> CreateFilm {
    CreateFilm {
        name: name.to_string(),
        description: "A film".to_string(),
        release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        duration: 120,
        mpa: MpaRef { id: 1 },
        genres: vec![],
    }
}

fn is_not_found(err: &StoreError) -> bool {
    matches!(err, StoreError::Core(CoreError::NotFound { .. }))
}

// ---------------------------------------------------------------------------
// Entity store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_user_round_trips_by_id() {
    let catalog = MemoryCatalog::new();
    let created = catalog.create_user(new_user("lorem")).await.unwrap();

    let fetched = catalog.user(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn created_film_round_trips_by_id() {
    let catalog = MemoryCatalog::new();
    let created = catalog.create_film(new_film("Ipsum")).await.unwrap();

    let fetched = catalog.film(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn ids_are_strictly_increasing() {
    let catalog = MemoryCatalog::new();
    let first = catalog.create_user(new_user("a")).await.unwrap();
    let second = catalog.create_user(new_user("b")).await.unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn blank_name_defaults_to_login() {
    let catalog = MemoryCatalog::new();
    let mut input = new_user("dolores");
    input.name = Some("   ".to_string());
    let created = catalog.create_user(input).await.unwrap();
    assert_eq!(created.name, "dolores");
}

#[tokio::test]
async fn update_of_missing_user_is_not_found() {
    let catalog = MemoryCatalog::new();
    let err = catalog
        .update_user(UpdateUser {
            id: 999,
            user: new_user("ghost"),
        })
        .await
        .unwrap_err();
    assert!(is_not_found(&err));

    // And it must not have silently created anything.
    assert!(catalog.users().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_of_missing_film_is_not_found() {
    let catalog = MemoryCatalog::new();
    let err = catalog
        .update_film(UpdateFilm {
            id: 999,
            film: new_film("Ghost"),
        })
        .await
        .unwrap_err();
    assert!(is_not_found(&err));
}

#[tokio::test]
async fn get_by_missing_id_is_not_found_for_both_kinds() {
    let catalog = MemoryCatalog::new();
    assert!(is_not_found(&catalog.user(999).await.unwrap_err()));
    assert!(is_not_found(&catalog.film(999).await.unwrap_err()));
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let catalog = MemoryCatalog::new();
    let created = catalog.create_user(new_user("old")).await.unwrap();

    let updated = catalog
        .update_user(UpdateUser {
            id: created.id,
            user: new_user("new"),
        })
        .await
        .unwrap();
    assert_eq!(updated.login, "new");
    assert_eq!(catalog.user(created.id).await.unwrap().login, "new");
}

#[tokio::test]
async fn list_returns_insertion_order() {
    let catalog = MemoryCatalog::new();
    catalog.create_user(new_user("first")).await.unwrap();
    catalog.create_user(new_user("second")).await.unwrap();

    let logins: Vec<String> = catalog
        .users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.login)
        .collect();
    assert_eq!(logins, vec!["first", "second"]);
}

// ---------------------------------------------------------------------------
// Film references
// ---------------------------------------------------------------------------

#[tokio::test]
async fn film_resolves_rating_and_genres() {
    let catalog = MemoryCatalog::new();
    let mut input = new_film("Tagged");
    input.mpa = MpaRef { id: 3 };
    input.genres = vec![GenreRef { id: 2 }, GenreRef { id: 1 }, GenreRef { id: 2 }];

    let film = catalog.create_film(input).await.unwrap();
    assert_eq!(film.mpa.name, "PG-13");
    // Deduplicated and ordered by genre id.
    let genre_ids: Vec<i64> = film.genres.iter().map(|g| g.id).collect();
    assert_eq!(genre_ids, vec![1, 2]);
}

#[tokio::test]
async fn unknown_rating_or_genre_is_not_found() {
    let catalog = MemoryCatalog::new();

    let mut bad_mpa = new_film("Bad rating");
    bad_mpa.mpa = MpaRef { id: 42 };
    assert!(is_not_found(&catalog.create_film(bad_mpa).await.unwrap_err()));

    let mut bad_genre = new_film("Bad genre");
    bad_genre.genres = vec![GenreRef { id: 42 }];
    assert!(is_not_found(
        &catalog.create_film(bad_genre).await.unwrap_err()
    ));

    // A failed create leaves no partial state.
    assert!(catalog.films().await.unwrap().is_empty());
}

#[tokio::test]
async fn reference_lookups_serve_seeded_tables() {
    let catalog = MemoryCatalog::new();
    assert_eq!(catalog.genres().await.unwrap().len(), 6);
    assert_eq!(catalog.mpa_ratings().await.unwrap().len(), 5);
    assert_eq!(catalog.genre(1).await.unwrap().name, "Comedy");
    assert_eq!(catalog.mpa(5).await.unwrap().name, "NC-17");
    assert!(is_not_found(&catalog.genre(99).await.unwrap_err()));
    assert!(is_not_found(&catalog.mpa(99).await.unwrap_err()));
}

// ---------------------------------------------------------------------------
// Friendship graph
// ---------------------------------------------------------------------------

#[tokio::test]
async fn friendship_is_symmetric() {
    let catalog = MemoryCatalog::new();
    let u1 = catalog.create_user(new_user("u1")).await.unwrap();
    let u2 = catalog.create_user(new_user("u2")).await.unwrap();

    catalog.add_friend(u1.id, u2.id).await.unwrap();

    assert_eq!(catalog.friends(u1.id).await.unwrap(), vec![u2.clone()]);
    assert_eq!(catalog.friends(u2.id).await.unwrap(), vec![u1]);
}

#[tokio::test]
async fn friend_removal_is_mutual() {
    let catalog = MemoryCatalog::new();
    let u1 = catalog.create_user(new_user("u1")).await.unwrap();
    let u2 = catalog.create_user(new_user("u2")).await.unwrap();

    catalog.add_friend(u1.id, u2.id).await.unwrap();
    catalog.remove_friend(u1.id, u2.id).await.unwrap();

    assert!(catalog.friends(u1.id).await.unwrap().is_empty());
    assert!(catalog.friends(u2.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn removing_absent_edge_is_a_noop() {
    let catalog = MemoryCatalog::new();
    let u1 = catalog.create_user(new_user("u1")).await.unwrap();
    let u2 = catalog.create_user(new_user("u2")).await.unwrap();

    catalog.remove_friend(u1.id, u2.id).await.unwrap();
    assert!(catalog.friends(u1.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn relation_mutation_requires_both_endpoints() {
    let catalog = MemoryCatalog::new();
    let u1 = catalog.create_user(new_user("u1")).await.unwrap();

    assert!(is_not_found(
        &catalog.add_friend(u1.id, 999).await.unwrap_err()
    ));
    assert!(is_not_found(
        &catalog.add_friend(999, u1.id).await.unwrap_err()
    ));
    assert!(is_not_found(&catalog.friends(999).await.unwrap_err()));
}

#[tokio::test]
async fn friends_come_back_in_insertion_order() {
    let catalog = MemoryCatalog::new();
    let u1 = catalog.create_user(new_user("u1")).await.unwrap();
    let u2 = catalog.create_user(new_user("u2")).await.unwrap();
    let u3 = catalog.create_user(new_user("u3")).await.unwrap();

    catalog.add_friend(u1.id, u3.id).await.unwrap();
    catalog.add_friend(u1.id, u2.id).await.unwrap();

    let ids: Vec<i64> = catalog
        .friends(u1.id)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(ids, vec![u3.id, u2.id]);
}

#[tokio::test]
async fn common_friends_is_the_set_intersection() {
    let catalog = MemoryCatalog::new();
    let u1 = catalog.create_user(new_user("u1")).await.unwrap();
    let u2 = catalog.create_user(new_user("u2")).await.unwrap();
    let shared = catalog.create_user(new_user("shared")).await.unwrap();
    let only_u1 = catalog.create_user(new_user("only_u1")).await.unwrap();

    catalog.add_friend(u1.id, shared.id).await.unwrap();
    catalog.add_friend(u1.id, only_u1.id).await.unwrap();
    catalog.add_friend(u2.id, shared.id).await.unwrap();

    assert_eq!(
        catalog.common_friends(u1.id, u2.id).await.unwrap(),
        vec![shared]
    );
}

#[tokio::test]
async fn common_friends_of_strangers_is_empty() {
    let catalog = MemoryCatalog::new();
    let u1 = catalog.create_user(new_user("u1")).await.unwrap();
    let u2 = catalog.create_user(new_user("u2")).await.unwrap();

    assert!(catalog
        .common_friends(u1.id, u2.id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Likes and popularity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn adding_a_like_twice_equals_adding_once() {
    let catalog = MemoryCatalog::new();
    let film = catalog.create_film(new_film("F1")).await.unwrap();
    let other = catalog.create_film(new_film("F2")).await.unwrap();
    let user = catalog.create_user(new_user("u1")).await.unwrap();

    catalog.add_like(film.id, user.id).await.unwrap();
    catalog.add_like(film.id, user.id).await.unwrap();

    // One like on F1 still outranks F2's none, and only by one edge:
    // removing it once fully clears the engagement.
    let top: Vec<i64> = catalog
        .popular_films(2)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(top, vec![film.id, other.id]);

    catalog.remove_like(film.id, user.id).await.unwrap();
    let top: Vec<i64> = catalog
        .popular_films(2)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(top, vec![film.id, other.id]);
}

#[tokio::test]
async fn removing_an_absent_like_is_a_noop() {
    let catalog = MemoryCatalog::new();
    let film = catalog.create_film(new_film("F1")).await.unwrap();
    let user = catalog.create_user(new_user("u1")).await.unwrap();

    catalog.remove_like(film.id, user.id).await.unwrap();
}

#[tokio::test]
async fn like_requires_both_endpoints() {
    let catalog = MemoryCatalog::new();
    let film = catalog.create_film(new_film("F1")).await.unwrap();
    let user = catalog.create_user(new_user("u1")).await.unwrap();

    assert!(is_not_found(
        &catalog.add_like(film.id, 999).await.unwrap_err()
    ));
    assert!(is_not_found(
        &catalog.add_like(999, user.id).await.unwrap_err()
    ));
}

#[tokio::test]
async fn popular_with_no_likes_falls_back_to_id_order() {
    let catalog = MemoryCatalog::new();
    let f1 = catalog.create_film(new_film("F1")).await.unwrap();
    let f2 = catalog.create_film(new_film("F2")).await.unwrap();
    catalog.create_film(new_film("F3")).await.unwrap();

    let top: Vec<i64> = catalog
        .popular_films(2)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(top, vec![f1.id, f2.id]);
}

#[tokio::test]
async fn popular_ranks_by_count_then_pads_with_unliked() {
    let catalog = MemoryCatalog::new();
    let f1 = catalog.create_film(new_film("F1")).await.unwrap();
    let f2 = catalog.create_film(new_film("F2")).await.unwrap();
    let f3 = catalog.create_film(new_film("F3")).await.unwrap();
    let u1 = catalog.create_user(new_user("u1")).await.unwrap();
    let u2 = catalog.create_user(new_user("u2")).await.unwrap();

    catalog.add_like(f2.id, u1.id).await.unwrap();
    catalog.add_like(f2.id, u2.id).await.unwrap();
    catalog.add_like(f1.id, u1.id).await.unwrap();

    // F2 count=2, F1 count=1, F3 count=0 fallback.
    let top: Vec<i64> = catalog
        .popular_films(3)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(top, vec![f2.id, f1.id, f3.id]);
}

#[tokio::test]
async fn popular_never_exceeds_requested_count() {
    let catalog = MemoryCatalog::new();
    for i in 0..5 {
        catalog.create_film(new_film(&format!("F{i}"))).await.unwrap();
    }

    assert_eq!(catalog.popular_films(3).await.unwrap().len(), 3);
    assert_eq!(catalog.popular_films(100).await.unwrap().len(), 5);
}

#[tokio::test]
async fn popular_ties_break_by_ascending_id() {
    let catalog = MemoryCatalog::new();
    let f1 = catalog.create_film(new_film("F1")).await.unwrap();
    let f2 = catalog.create_film(new_film("F2")).await.unwrap();
    let user = catalog.create_user(new_user("u1")).await.unwrap();

    catalog.add_like(f2.id, user.id).await.unwrap();
    catalog.add_like(f1.id, user.id).await.unwrap();

    let top: Vec<i64> = catalog
        .popular_films(2)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(top, vec![f1.id, f2.id]);
}
