//! Display rows: genre shelves or a single search shelf.

use std::collections::BTreeMap;

use super::aggregate::Categories;
use super::genre::Genre;
use crate::omdb::Movie;

/// Key of one displayed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShelfKey {
    /// A genre row from the category load.
    Genre(Genre),
    /// The single row holding search results.
    Search,
}

impl ShelfKey {
    /// Row heading, e.g. `SCI-FI MOVIES` or `Search Results`.
    #[must_use]
    pub fn title(self) -> String {
        match self {
            Self::Genre(genre) => format!("{} MOVIES", genre.keyword().to_uppercase()),
            Self::Search => String::from("Search Results"),
        }
    }
}

/// Rows currently on screen, in display order.
pub type Shelves = BTreeMap<ShelfKey, Vec<Movie>>;

/// One shelf per loaded genre.
#[must_use]
pub fn shelves_from_categories(categories: Categories) -> Shelves {
    categories
        .into_iter()
        .map(|(genre, movies)| (ShelfKey::Genre(genre), movies))
        .collect()
}

/// A single search shelf.
#[must_use]
pub fn shelves_from_search(movies: Vec<Movie>) -> Shelves {
    Shelves::from([(ShelfKey::Search, movies)])
}
