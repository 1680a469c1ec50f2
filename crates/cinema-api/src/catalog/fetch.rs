//! Keyword fetch and free-text search over the OMDb transport.

use tracing::instrument;

use crate::omdb::{Movie, OmdbApi};

/// Longest accepted search query, in characters (after trimming).
pub const MAX_QUERY_CHARS: usize = 200;

/// Message used when upstream reports no results without an `Error` text.
const NO_RESULTS_FALLBACK: &str = "No results found";

/// Why a query was rejected before sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryProblem {
    /// Nothing left after trimming.
    Empty,
    /// More than [`MAX_QUERY_CHARS`] characters after trimming.
    TooLong,
}

impl std::fmt::Display for QueryProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("query is empty"),
            Self::TooLong => f.write_str("query is too long"),
        }
    }
}

/// Why a search produced no movies.
#[derive(Debug)]
pub enum SearchError {
    /// The query was rejected before any request was sent.
    InvalidQuery(QueryProblem),
    /// Upstream answered `Response: "False"`; carries its `Error` text.
    NotFound(String),
    /// The request itself failed (network, timeout, HTTP status, bad JSON).
    Transport(anyhow::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery(reason) => write!(f, "invalid search query: {reason}"),
            Self::NotFound(message) => f.write_str(message),
            Self::Transport(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => err.source(),
            Self::InvalidQuery(_) | Self::NotFound(_) => None,
        }
    }
}

/// Trims `text` and checks it is a usable query.
///
/// # Errors
///
/// Returns `SearchError::InvalidQuery` if the trimmed text is empty or
/// longer than [`MAX_QUERY_CHARS`].
pub fn validate_query(text: &str) -> Result<&str, SearchError> {
    let query = text.trim();
    if query.is_empty() {
        return Err(SearchError::InvalidQuery(QueryProblem::Empty));
    }
    if query.chars().count() > MAX_QUERY_CHARS {
        return Err(SearchError::InvalidQuery(QueryProblem::TooLong));
    }
    Ok(query)
}

/// Fetches the movies matching a genre keyword.
///
/// Never fails: "no results" yields an empty list, and transport errors are
/// logged at WARN and also yield an empty list.
#[instrument(skip_all, fields(keyword = %keyword))]
pub async fn fetch_by_keyword(api: &(impl OmdbApi + Sync), keyword: &str) -> Vec<Movie> {
    match api.search(keyword).await {
        Ok(response) if response.is_success() => {
            tracing::debug!(fetched = response.search.len(), "keyword fetch completed");
            response.search
        }
        Ok(response) => {
            tracing::debug!(
                reason = response.error.as_deref().unwrap_or(NO_RESULTS_FALLBACK),
                "keyword returned no results"
            );
            Vec::new()
        }
        Err(err) => {
            let error = format!("{err:#}");
            tracing::warn!(%error, "keyword fetch failed, showing no movies");
            Vec::new()
        }
    }
}

/// Searches movies by free text.
///
/// # Errors
///
/// - `SearchError::InvalidQuery` if `text` fails [`validate_query`]; no
///   request is sent.
/// - `SearchError::NotFound` if upstream reports no results.
/// - `SearchError::Transport` if the request fails.
#[instrument(skip_all)]
pub async fn search_by_query(
    api: &(impl OmdbApi + Sync),
    text: &str,
) -> Result<Vec<Movie>, SearchError> {
    let query = validate_query(text)?;

    let response = api.search(query).await.map_err(SearchError::Transport)?;
    if !response.is_success() {
        let message = response
            .error
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| String::from(NO_RESULTS_FALLBACK));
        return Err(SearchError::NotFound(message));
    }

    tracing::debug!(query, fetched = response.search.len(), "search completed");
    Ok(response.search)
}
