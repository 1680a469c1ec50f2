//! OMDb API client module.
//!
//! Handles HTTP requests to the OMDb search endpoint (`?s=`)
//! and decodes the `Search` / `Response` / `Error` envelope.

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{OmdbClient, OmdbClientBuilder};
pub use error::ConfigError;
#[allow(clippy::module_name_repetitions)]
pub use types::{Movie, OmdbSearchResponse};
