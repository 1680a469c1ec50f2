//! In-memory `OmdbApi` for catalog tests.
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow};

use crate::omdb::{Movie, OmdbApi, OmdbSearchResponse};

/// Canned reply for one query.
#[derive(Debug, Clone)]
pub enum Reply {
    /// `Response: "True"` with these movies.
    Found(Vec<Movie>),
    /// `Response: "False"` with this `Error`.
    NotFound(Option<&'static str>),
    /// Transport failure, wrapped the way `OmdbClient` wraps it.
    Fail(&'static str),
}

/// Mock API that answers from a query -> reply table and records every call.
///
/// Unknown queries answer `NotFound(Some("Movie not found!"))`.
#[derive(Debug, Default)]
pub struct MockOmdbApi {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl MockOmdbApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, query: &str, reply: Reply) -> Self {
        self.replies.insert(String::from(query), reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl OmdbApi for MockOmdbApi {
    async fn search(&self, query: &str) -> Result<OmdbSearchResponse> {
        self.calls.lock().unwrap().push(String::from(query));
        match self.replies.get(query) {
            Some(Reply::Found(movies)) => Ok(OmdbSearchResponse {
                search: movies.clone(),
                total_results: Some(movies.len().to_string()),
                response: String::from("True"),
                error: None,
            }),
            Some(Reply::NotFound(message)) => Ok(not_found(*message)),
            Some(Reply::Fail(reason)) => Err(anyhow!("{reason}").context("OMDb request failed")),
            None => Ok(not_found(Some("Movie not found!"))),
        }
    }
}

fn not_found(message: Option<&str>) -> OmdbSearchResponse {
    OmdbSearchResponse {
        search: Vec::new(),
        total_results: None,
        response: String::from("False"),
        error: message.map(String::from),
    }
}

/// Helper to create a minimal `Movie`.
pub fn make_movie(imdb_id: &str, title: &str) -> Movie {
    Movie {
        title: String::from(title),
        year: String::from("2000"),
        imdb_id: String::from(imdb_id),
        kind: String::from("movie"),
        poster: String::from("N/A"),
    }
}
