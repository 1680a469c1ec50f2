//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::OmdbSearchResponse;

/// OMDb API trait.
///
/// Abstracts the raw search transport for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Runs `?s=<query>` and returns the decoded envelope as-is.
    ///
    /// A `Response: "False"` envelope is a successful call; interpreting it
    /// is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, upstream answers with a
    /// non-success status, or the body is not valid JSON.
    async fn search(&self, query: &str) -> Result<OmdbSearchResponse>;
}
