//! OMDb API response types.

use serde::{Deserialize, Serialize};

/// A single movie record from the `Search` array.
///
/// Passed through as received; fields are not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Movie title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year as reported upstream (may be a range such as `2019–2021`).
    #[serde(rename = "Year")]
    pub year: String,
    /// IMDb identifier (e.g. `tt0372784`).
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Record type (`movie`, `series`, `episode`, ...).
    #[serde(rename = "Type", default)]
    pub kind: String,
    /// Poster image URL, or `N/A`.
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

impl Movie {
    /// Returns the poster URL, or `None` when upstream reports `N/A`.
    #[must_use]
    pub fn poster_url(&self) -> Option<&str> {
        match self.poster.as_str() {
            "" | "N/A" => None,
            url => Some(url),
        }
    }
}

/// Response envelope from the `?s=` search endpoint.
///
/// On success `Response` is `"True"` and `Search` holds the results.
/// On failure `Response` is `"False"` and `Error` carries the reason
/// (e.g. `"Movie not found!"`).
#[derive(Debug, Clone, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbSearchResponse {
    /// Search results (absent when `Response` is `"False"`).
    #[serde(rename = "Search", default)]
    pub search: Vec<Movie>,
    /// Total number of matches, as a decimal string.
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    /// `"True"` or `"False"`.
    #[serde(rename = "Response")]
    pub response: String,
    /// Failure reason when `Response` is `"False"`.
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    /// Whether upstream reported a successful search.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    /// Parsed `totalResults`, if present and numeric.
    #[must_use]
    pub fn total_results(&self) -> Option<u32> {
        self.total_results.as_deref()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_search_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/search_batman.json");

        // Act
        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.is_success());
        assert_eq!(response.search.len(), 3);
        assert_eq!(response.search[0].title, "Batman Begins");
        assert_eq!(response.search[0].imdb_id, "tt0372784");
        assert_eq!(response.search[0].kind, "movie");
        assert_eq!(response.total_results(), Some(610));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_parse_not_found_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/search_not_found.json");

        // Act
        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!response.is_success());
        assert!(response.search.is_empty());
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
        assert_eq!(response.total_results(), None);
    }

    #[test]
    fn test_poster_url_na_is_none() {
        // Arrange
        let json = r#"{"Title":"Obscure","Year":"1971","imdbID":"tt0000001","Poster":"N/A"}"#;

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.poster_url(), None);
    }

    #[test]
    fn test_movie_without_optional_fields() {
        // Arrange
        let json = r#"{"Title":"Bare","Year":"2001","imdbID":"tt0000002"}"#;

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.kind.is_empty());
        assert_eq!(movie.poster_url(), None);
    }

    #[test]
    fn test_response_flag_is_case_insensitive() {
        // Arrange
        let json = r#"{"Search":[],"totalResults":"0","Response":"true"}"#;

        // Act
        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.is_success());
        assert_eq!(response.total_results(), Some(0));
    }
}
