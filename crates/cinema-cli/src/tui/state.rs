//! Browser page state: load phase, shelves, error banner, cursors.

use cinema_api::catalog::{
    Categories, QueryProblem, SearchError, ShelfKey, Shelves, shelves_from_categories,
    shelves_from_search, validate_query,
};
use cinema_api::omdb::Movie;

/// Banner shown when the category load itself fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load movies...";

/// What is currently being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// The initial (or refreshed) genre shelves.
    Categories,
    /// A free-text search.
    Search,
}

/// Page-level load phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    /// A fetch is in flight.
    Loading(LoadKind),
    /// Shelves are displayable (possibly with an error banner).
    Ready,
    /// The category load failed and nothing is displayable.
    Failed,
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Search,
}

/// Outcome of submitting the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStart {
    /// Nothing to do (blank/invalid query, or a search is already running).
    Ignored,
    /// Run a search for `query`.
    Started {
        /// Trimmed query text.
        query: String,
        /// Whether an in-flight category load must be cancelled first.
        supersedes_load: bool,
    },
}

/// State for the browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Rows on screen.
    pub shelves: Shelves,
    /// Load phase.
    pub phase: Phase,
    /// Error banner text.
    pub error: Option<String>,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search box text.
    pub query: String,
    /// Cursor position in the shelf list.
    pub shelf_cursor: usize,
    /// Cursor position within the current shelf.
    pub movie_cursor: usize,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserState {
    /// Creates an idle state with nothing loaded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shelves: Shelves::new(),
            phase: Phase::Idle,
            error: None,
            input_mode: InputMode::Normal,
            query: String::new(),
            shelf_cursor: 0,
            movie_cursor: 0,
        }
    }

    /// Whether any fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading(_))
    }

    /// Enters `Loading(Categories)`.
    pub const fn begin_category_load(&mut self) {
        self.phase = Phase::Loading(LoadKind::Categories);
    }

    /// Applies a finished category load. `Err` carries the failure reason.
    pub fn finish_category_load(&mut self, result: Result<Categories, String>) {
        match result {
            Ok(categories) => {
                self.replace_shelves(shelves_from_categories(categories));
                self.error = None;
                self.phase = Phase::Ready;
            }
            Err(reason) => {
                tracing::error!(%reason, "category load failed");
                self.error = Some(String::from(LOAD_FAILED_MESSAGE));
                self.phase = Phase::Failed;
            }
        }
    }

    /// Submits the search box.
    ///
    /// Blank queries and submissions during another search are ignored.
    /// A submission during a category load supersedes it.
    pub fn begin_search(&mut self) -> SearchStart {
        if self.phase == Phase::Loading(LoadKind::Search) {
            return SearchStart::Ignored;
        }
        let query = match validate_query(&self.query) {
            Ok(query) => String::from(query),
            Err(SearchError::InvalidQuery(QueryProblem::Empty)) => return SearchStart::Ignored,
            Err(err) => {
                self.error = Some(format!("Failed to search movies: {err}"));
                return SearchStart::Ignored;
            }
        };

        let supersedes_load = self.phase == Phase::Loading(LoadKind::Categories);
        self.phase = Phase::Loading(LoadKind::Search);
        SearchStart::Started {
            query,
            supersedes_load,
        }
    }

    /// Applies a finished search.
    ///
    /// Success replaces the shelves with a single search shelf and clears
    /// the banner. Failure keeps whatever was displayed and sets the banner.
    pub fn finish_search(&mut self, result: Result<Vec<Movie>, SearchError>) {
        match result {
            Ok(movies) => {
                self.replace_shelves(shelves_from_search(movies));
                self.error = None;
            }
            Err(err) => {
                self.error = Some(format!("Failed to search movies: {err}"));
            }
        }
        self.phase = Phase::Ready;
    }

    fn replace_shelves(&mut self, shelves: Shelves) {
        self.shelves = shelves;
        self.shelf_cursor = 0;
        self.movie_cursor = 0;
    }

    /// Returns the shelf under the cursor.
    #[must_use]
    pub fn current_shelf(&self) -> Option<(ShelfKey, &[Movie])> {
        self.shelves
            .iter()
            .nth(self.shelf_cursor)
            .map(|(key, movies)| (*key, movies.as_slice()))
    }

    /// Returns the movie under the cursor.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&Movie> {
        self.current_shelf()?.1.get(self.movie_cursor)
    }

    /// Moves to the previous shelf.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn move_up(&mut self) {
        if self.shelf_cursor > 0 {
            self.shelf_cursor -= 1;
            self.movie_cursor = 0;
        }
    }

    /// Moves to the next shelf.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        if self.shelf_cursor + 1 < self.shelves.len() {
            self.shelf_cursor += 1;
            self.movie_cursor = 0;
        }
    }

    /// Moves to the previous movie in the shelf.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn move_left(&mut self) {
        if self.movie_cursor > 0 {
            self.movie_cursor -= 1;
        }
    }

    /// Moves to the next movie in the shelf.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_right(&mut self) {
        let count = self.current_shelf().map_or(0, |(_, movies)| movies.len());
        if self.movie_cursor + 1 < count {
            self.movie_cursor += 1;
        }
    }

    /// Appends a character to the search box.
    pub fn query_push(&mut self, c: char) {
        self.query.push(c);
    }

    /// Removes the last character from the search box.
    pub fn query_pop(&mut self) {
        self.query.pop();
    }
}
