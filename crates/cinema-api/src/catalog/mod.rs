//! Genre catalog built on the OMDb search endpoint.
//!
//! OMDb has no category endpoint, so each genre is approximated by a
//! keyword search. Two operations share the transport but differ in how
//! they fail:
//!
//! - [`fetch_by_keyword`] never fails. "No results" and transport errors
//!   both degrade to an empty list so one genre cannot block the page.
//! - [`search_by_query`] surfaces both as [`SearchError`] so the user sees
//!   why a search produced nothing.

mod aggregate;
mod fetch;
mod genre;
#[cfg(test)]
pub(crate) mod mock;
mod shelf;

pub use aggregate::{
    Categories, load_categories, load_categories_concurrent, load_categories_with,
};
pub use fetch::{
    MAX_QUERY_CHARS, QueryProblem, SearchError, fetch_by_keyword, search_by_query, validate_query,
};
pub use genre::{Genre, UnknownGenre};
pub use shelf::{ShelfKey, Shelves, shelves_from_categories, shelves_from_search};
