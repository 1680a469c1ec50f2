//! Application configuration module.
//!
//! Manages the TOML config file holding OMDb client settings and the
//! genre catalog selection.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, OmdbConfig};
pub use paths::{resolve_config_path, resolve_log_path};
