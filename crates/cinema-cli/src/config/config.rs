//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use cinema_api::catalog::Genre;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb client settings.
    #[serde(default)]
    pub omdb: OmdbConfig,
    /// Genre catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// OMDb client configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OmdbConfig {
    /// Endpoint override (default: `https://www.omdbapi.com/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API key, used when `OMDB_API_KEY` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Retries for timeouts, connection failures and HTTP 5xx.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

/// Genre catalog configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Genres to load. Shelves are always shown in `Genre` declaration order.
    #[serde(default = "default_genres")]
    pub genres: Vec<Genre>,
    /// Maximum genre requests in flight (1 = sequential).
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_genres() -> Vec<Genre> {
    Genre::ALL.to_vec()
}

const fn default_concurrency() -> usize {
    1
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            genres: default_genres(),
            concurrency: default_concurrency(),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.catalog.genres, Genre::ALL);
        assert_eq!(config.catalog.concurrency, 1);
        assert!(config.omdb.api_key.is_none());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            omdb: OmdbConfig {
                base_url: Some(String::from("http://localhost:8080/")),
                api_key: None,
                timeout_secs: Some(3),
                max_retries: Some(0),
            },
            catalog: CatalogConfig {
                genres: vec![Genre::SciFi, Genre::Horror],
                concurrency: 4,
            },
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
        assert!(toml_str.contains(r#""sci-fi""#));
        assert!(!toml_str.contains("api_key"));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            catalog: CatalogConfig {
                genres: vec![Genre::Comedy],
                concurrency: 2,
            },
            ..AppConfig::default()
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\nconcurrency = 3\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.catalog.concurrency, 3);
        assert_eq!(config.catalog.genres, Genre::ALL);
        assert_eq!(config.omdb, OmdbConfig::default());
    }

    #[test]
    fn test_load_rejects_unknown_genre() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\ngenres = [\"western\"]\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }
}
