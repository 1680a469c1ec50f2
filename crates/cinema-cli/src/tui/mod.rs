//! TUI module for the interactive movie browser.
//!
//! Uses `ratatui` + `crossterm` for rendering.

mod browser;
/// Browser page state types.
pub mod state;
mod ui;

pub use browser::run_browser;
