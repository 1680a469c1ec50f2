//! TUI rendering logic for the movie browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use super::state::{BrowserState, InputMode, LoadKind, Phase};

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &BrowserState) {
    let banner_height = if state.error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // header
            Constraint::Length(banner_height), // error banner
            Constraint::Min(5),                // shelves
            Constraint::Length(3),             // selected movie
            Constraint::Length(3),             // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);
    if let Some(message) = &state.error {
        let banner = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title(" Error "));
        frame.render_widget(banner, chunks[1]);
    }
    draw_main(frame, chunks[2], state);
    draw_detail(frame, chunks[3], state);
    draw_footer(frame, chunks[4], state);
}

/// Draws the header with the search box and load status.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search_style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.query.as_str())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let status_text = match state.phase {
        Phase::Idle => String::new(),
        Phase::Loading(LoadKind::Categories) => String::from("Loading categories..."),
        Phase::Loading(LoadKind::Search) => String::from("Searching..."),
        Phase::Ready => {
            let total: usize = state.shelves.values().map(Vec::len).sum();
            format!("{} shelves, {total} movies", state.shelves.len())
        }
        Phase::Failed => String::from("Load failed"),
    };
    let block = Block::default().borders(Borders::ALL).title(" Cinema ");
    frame.render_widget(Paragraph::new(status_text).block(block), header_chunks[1]);
}

/// Draws the shelf list and the movies of the current shelf.
#[allow(clippy::indexing_slicing)]
fn draw_main(frame: &mut Frame, area: Rect, state: &BrowserState) {
    if state.shelves.is_empty() && state.is_loading() {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(loading, area);
        return;
    }

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    draw_shelves_pane(frame, pane_chunks[0], state);
    draw_movies_pane(frame, pane_chunks[1], state);
}

/// Draws the shelf titles (left pane).
fn draw_shelves_pane(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let items: Vec<ListItem> = state
        .shelves
        .iter()
        .enumerate()
        .map(|(i, (key, movies))| {
            let is_current = i == state.shelf_cursor;
            let marker = if is_current { "\u{25b8} " } else { "  " };
            let style = if is_current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if movies.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{} ({})", key.title(), movies.len()), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Shelves "));
    frame.render_widget(list, area);
}

/// Draws the movies of the current shelf (right pane).
fn draw_movies_pane(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let Some((key, movies)) = state.current_shelf() else {
        let block = Block::default().borders(Borders::ALL).title(" Movies ");
        frame.render_widget(block, area);
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", key.title()));

    if movies.is_empty() {
        let empty = Paragraph::new("No movies found")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = movies
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            let style = if i == state.movie_cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![Span::styled(
                format!(" {:<6} {}", movie.year, movie.title),
                style,
            )]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Draws details of the selected movie.
fn draw_detail(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let text = state.selected_movie().map_or_else(String::new, |movie| {
        format!(
            "{} ({})  {}  poster: {}",
            movie.title,
            movie.year,
            movie.imdb_id,
            movie.poster_url().unwrap_or("none")
        )
    });
    let detail = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(detail, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help_text = if state.input_mode == InputMode::Search {
        "Type a title | Enter: search | Esc: back"
    } else {
        "\u{2191}\u{2193}/j/k: shelf  \u{2190}\u{2192}/h/l: movie  /: search  r: reload  q: quit"
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
