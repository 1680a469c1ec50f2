//! Movie browser TUI main loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use cinema_api::catalog::{Categories, Genre, SearchError, load_categories_with, search_by_query};
use cinema_api::omdb::{Movie, OmdbApi, OmdbClient};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::task::JoinHandle;

use super::state::{BrowserState, InputMode, SearchStart};
use super::ui;

/// Delay between loop iterations; spawned fetches progress while it elapses.
const TICK: Duration = Duration::from_millis(50);

/// Fetch running in the background.
#[derive(Debug)]
enum Pending {
    Categories(JoinHandle<Categories>),
    Search(JoinHandle<Result<Vec<Movie>, SearchError>>),
}

impl Pending {
    fn is_finished(&self) -> bool {
        match self {
            Self::Categories(handle) => handle.is_finished(),
            Self::Search(handle) => handle.is_finished(),
        }
    }

    fn abort(&self) {
        match self {
            Self::Categories(handle) => handle.abort(),
            Self::Search(handle) => handle.abort(),
        }
    }
}

/// Result of a key press in normal mode.
#[derive(Debug)]
enum Action {
    Quit,
    Reload,
}

/// Shared inputs for spawning fetches.
#[derive(Debug)]
struct Loader<A> {
    client: Arc<A>,
    genres: Vec<Genre>,
    concurrency: usize,
}

impl<A: OmdbApi + Sync + 'static> Loader<A> {
    fn spawn_categories(&self) -> Pending {
        let client = Arc::clone(&self.client);
        let genres = self.genres.clone();
        let concurrency = self.concurrency;
        Pending::Categories(tokio::spawn(async move {
            load_categories_with(client.as_ref(), &genres, concurrency).await
        }))
    }

    fn spawn_search(&self, query: String) -> Pending {
        let client = Arc::clone(&self.client);
        Pending::Search(tokio::spawn(async move {
            search_by_query(client.as_ref(), &query).await
        }))
    }
}

/// Runs the movie browser until the user quits.
///
/// The category load starts immediately; searches replace the shelves.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser(
    client: Arc<OmdbClient>,
    genres: Vec<Genre>,
    concurrency: usize,
) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let loader = Loader {
        client,
        genres,
        concurrency,
    };
    let mut state = BrowserState::new();

    let result = run_event_loop(&mut terminal, &mut state, &loader).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A: OmdbApi + Sync + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    loader: &Loader<A>,
) -> Result<()> {
    state.begin_category_load();
    let mut pending = Some(loader.spawn_categories());

    let outcome = loop {
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        if let Some(task) = pending.take_if(|task| task.is_finished()) {
            apply_finished(state, task).await;
        }

        if event::poll(Duration::ZERO).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            match state.input_mode {
                InputMode::Search => {
                    if handle_search_input(state, key.code) {
                        submit_search(state, loader, &mut pending);
                    }
                }
                InputMode::Normal => match handle_normal_input(state, key.code, key.modifiers) {
                    Some(Action::Quit) => break Ok(()),
                    Some(Action::Reload) if !state.is_loading() => {
                        state.begin_category_load();
                        pending = Some(loader.spawn_categories());
                    }
                    Some(Action::Reload) | None => {}
                },
            }
        }

        tokio::time::sleep(TICK).await;
    };

    if let Some(task) = pending {
        task.abort();
    }
    outcome
}

/// Feeds a finished fetch into the state.
async fn apply_finished(state: &mut BrowserState, task: Pending) {
    match task {
        Pending::Categories(handle) => {
            let result = handle.await.map_err(|err| err.to_string());
            state.finish_category_load(result);
        }
        Pending::Search(handle) => {
            let result = handle.await.unwrap_or_else(|err| {
                Err(SearchError::Transport(
                    anyhow::Error::new(err).context("search task failed"),
                ))
            });
            state.finish_search(result);
        }
    }
}

/// Starts a search if the state accepts it.
///
/// A category load still in flight is aborted and returned.
fn submit_search<A: OmdbApi + Sync + 'static>(
    state: &mut BrowserState,
    loader: &Loader<A>,
    pending: &mut Option<Pending>,
) -> Option<Pending> {
    let SearchStart::Started {
        query,
        supersedes_load,
    } = state.begin_search()
    else {
        return None;
    };

    let stale = if supersedes_load { pending.take() } else { None };
    if let Some(task) = &stale {
        tracing::debug!("search supersedes category load");
        task.abort();
    }
    *pending = Some(loader.spawn_search(query));
    stale
}

/// Handles key input in search mode. Returns `true` when the query is submitted.
fn handle_search_input(state: &mut BrowserState, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
            return true;
        }
        KeyCode::Backspace => {
            state.query_pop();
        }
        KeyCode::Char(c) => {
            state.query_push(c);
        }
        _ => {}
    }
    false
}

/// Handles key input in normal mode.
fn handle_normal_input(
    state: &mut BrowserState,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Option<Action> {
    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Action::Quit);
        }
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('r') => return Some(Action::Reload),
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Left | KeyCode::Char('h') => state.move_left(),
        KeyCode::Right | KeyCode::Char('l') => state.move_right(),
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use cinema_api::omdb::OmdbSearchResponse;

    use super::*;
    use crate::tui::state::{LOAD_FAILED_MESSAGE, LoadKind, Phase};

    /// API that answers "not found" after a fixed delay.
    struct SlowApi {
        delay: Duration,
    }

    impl OmdbApi for SlowApi {
        async fn search(&self, _query: &str) -> anyhow::Result<OmdbSearchResponse> {
            tokio::time::sleep(self.delay).await;
            Ok(OmdbSearchResponse {
                search: Vec::new(),
                total_results: None,
                response: String::from("False"),
                error: Some(String::from("Movie not found!")),
            })
        }
    }

    fn slow_loader(delay: Duration) -> Loader<SlowApi> {
        Loader {
            client: Arc::new(SlowApi { delay }),
            genres: vec![Genre::Action, Genre::Horror],
            concurrency: 1,
        }
    }

    fn typed_state(text: &str) -> BrowserState {
        let mut state = BrowserState::new();
        for c in text.chars() {
            state.query_push(c);
        }
        state
    }

    #[tokio::test]
    async fn test_search_aborts_category_load() {
        // Arrange
        let loader = slow_loader(Duration::from_secs(60));
        let mut state = typed_state("alien");
        state.begin_category_load();
        let mut pending = Some(loader.spawn_categories());

        // Act
        let stale = submit_search(&mut state, &loader, &mut pending);

        // Assert
        assert_eq!(state.phase, Phase::Loading(LoadKind::Search));
        assert!(matches!(pending, Some(Pending::Search(_))));
        assert!(matches!(stale, Some(Pending::Categories(_))));
        if let Some(Pending::Categories(handle)) = stale {
            assert!(handle.await.unwrap_err().is_cancelled());
        }
        pending.unwrap().abort();
    }

    #[tokio::test]
    async fn test_second_search_keeps_first_running() {
        // Arrange
        let loader = slow_loader(Duration::from_millis(20));
        let mut state = typed_state("alien");
        let mut pending = None;
        submit_search(&mut state, &loader, &mut pending);

        // Act
        let stale = submit_search(&mut state, &loader, &mut pending);

        // Assert
        assert!(stale.is_none());
        assert_eq!(state.phase, Phase::Loading(LoadKind::Search));
        assert!(matches!(pending, Some(Pending::Search(_))));
        if let Some(Pending::Search(handle)) = pending {
            let result = handle.await.unwrap();
            assert!(matches!(result, Err(SearchError::NotFound(_))));
        }
    }

    #[tokio::test]
    async fn test_finished_search_sets_banner() {
        // Arrange
        let loader = slow_loader(Duration::ZERO);
        let mut state = typed_state("qwertyuiop");
        let mut pending = None;
        submit_search(&mut state, &loader, &mut pending);
        let task = pending.take().unwrap();
        while !task.is_finished() {
            tokio::task::yield_now().await;
        }

        // Act
        apply_finished(&mut state, task).await;

        // Assert
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to search movies: Movie not found!")
        );
    }

    #[tokio::test]
    async fn test_cancelled_category_load_fails_page() {
        // Arrange
        let loader = slow_loader(Duration::from_secs(60));
        let mut state = BrowserState::new();
        state.begin_category_load();
        let task = loader.spawn_categories();
        task.abort();

        // Act
        apply_finished(&mut state, task).await;

        // Assert
        assert_eq!(state.phase, Phase::Failed);
        assert_eq!(state.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    }

    #[tokio::test]
    #[allow(clippy::panic)]
    async fn test_panicked_search_becomes_transport_error() {
        // Arrange
        let mut state = typed_state("alien");
        state.begin_search();
        let handle: JoinHandle<Result<Vec<Movie>, SearchError>> =
            tokio::spawn(async { panic!("search worker crashed") });

        // Act
        apply_finished(&mut state, Pending::Search(handle)).await;

        // Assert
        assert_eq!(state.phase, Phase::Ready);
        assert!(
            state
                .error
                .unwrap()
                .starts_with("Failed to search movies: search task failed")
        );
    }

    #[test]
    fn test_normal_keys() {
        // Arrange
        let mut state = BrowserState::new();

        // Act & Assert
        assert!(matches!(
            handle_normal_input(&mut state, KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Quit)
        ));
        assert!(matches!(
            handle_normal_input(&mut state, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        ));
        assert!(matches!(
            handle_normal_input(&mut state, KeyCode::Char('r'), KeyModifiers::NONE),
            Some(Action::Reload)
        ));
        assert!(handle_normal_input(&mut state, KeyCode::Char('/'), KeyModifiers::NONE).is_none());
        assert_eq!(state.input_mode, InputMode::Search);
    }

    #[test]
    fn test_search_keys_edit_and_submit() {
        // Arrange
        let mut state = BrowserState::new();
        state.input_mode = InputMode::Search;

        // Act
        let typed = handle_search_input(&mut state, KeyCode::Char('q'));
        handle_search_input(&mut state, KeyCode::Char('x'));
        handle_search_input(&mut state, KeyCode::Backspace);
        let submitted = handle_search_input(&mut state, KeyCode::Enter);

        // Assert
        assert!(!typed);
        assert!(submitted);
        assert_eq!(state.query, "q");
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn test_search_escape_keeps_query() {
        // Arrange
        let mut state = BrowserState::new();
        state.input_mode = InputMode::Search;
        state.query_push('a');

        // Act
        let submitted = handle_search_input(&mut state, KeyCode::Esc);

        // Assert
        assert!(!submitted);
        assert_eq!(state.query, "a");
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
