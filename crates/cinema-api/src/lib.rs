//! API client library for cinema.
//!
//! Provides the OMDb search client and the genre catalog built on top of it.

/// Genre catalog: keyword fetch, search, and category aggregation.
pub mod catalog;

/// OMDb API client.
pub mod omdb;
