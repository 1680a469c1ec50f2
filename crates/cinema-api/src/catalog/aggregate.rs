//! Category aggregation: one keyword fetch per genre.

use std::collections::{BTreeMap, HashSet};

use futures::StreamExt;
use tracing::instrument;

use super::fetch::fetch_by_keyword;
use super::genre::Genre;
use crate::omdb::{Movie, OmdbApi};

/// Genre -> movies, iterated in genre display order.
pub type Categories = BTreeMap<Genre, Vec<Movie>>;

/// Drops repeated genres, keeping first occurrences.
fn distinct(genres: &[Genre]) -> Vec<Genre> {
    let mut seen = HashSet::new();
    genres.iter().copied().filter(|g| seen.insert(*g)).collect()
}

/// Loads every genre one request at a time, in order.
///
/// Never fails: a genre whose fetch fails maps to an empty list.
#[instrument(skip_all)]
pub async fn load_categories(api: &(impl OmdbApi + Sync), genres: &[Genre]) -> Categories {
    let mut categories = Categories::new();
    for genre in distinct(genres) {
        let movies = fetch_by_keyword(api, genre.keyword()).await;
        tracing::debug!(%genre, fetched = movies.len(), "category loaded");
        categories.insert(genre, movies);
    }

    tracing::info!(
        genres = categories.len(),
        movies = categories.values().map(Vec::len).sum::<usize>(),
        "Category load completed"
    );
    categories
}

/// Loads every genre with at most `limit` requests in flight.
///
/// Produces the same mapping as [`load_categories`]. A `limit` of 0 is
/// treated as 1.
#[instrument(skip_all)]
pub async fn load_categories_concurrent(
    api: &(impl OmdbApi + Sync),
    genres: &[Genre],
    limit: usize,
) -> Categories {
    let limit = limit.max(1);
    let categories: Categories = futures::stream::iter(distinct(genres))
        .map(move |genre| async move { (genre, fetch_by_keyword(api, genre.keyword()).await) })
        .buffered(limit)
        .collect()
        .await;

    tracing::info!(
        genres = categories.len(),
        movies = categories.values().map(Vec::len).sum::<usize>(),
        limit,
        "Category load completed"
    );
    categories
}

/// Loads sequentially when `concurrency <= 1`, otherwise fans out.
pub async fn load_categories_with(
    api: &(impl OmdbApi + Sync),
    genres: &[Genre],
    concurrency: usize,
) -> Categories {
    if concurrency <= 1 {
        load_categories(api, genres).await
    } else {
        load_categories_concurrent(api, genres, concurrency).await
    }
}
