//! Popularity ranking: ranked-then-fallback ordering over engagement counts.
//!
//! Films with at least one like come first, ordered by like count descending
//! with ties broken by id ascending. Films nobody has liked yet pad the tail
//! in id order, so a top-N request over a sparsely-liked catalog still comes
//! back fully populated.

use crate::types::DbId;

/// Order films by engagement and return at most `count` ids.
///
/// `counts` holds one `(film_id, like_count)` pair per film, in any order.
/// The returned ordering is total and deterministic: count descending, then
/// id ascending, which places every zero-count film after every liked film.
pub fn rank_by_engagement(counts: &[(DbId, usize)], count: usize) -> Vec<DbId> {
    let mut ranked: Vec<(DbId, usize)> = counts.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(count).map(|(id, _)| id).collect()
}
