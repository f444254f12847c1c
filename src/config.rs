// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::{DEFAULT_API_URL, SortSelector};
use crate::error::ConfigError;
use crate::favorites::{FAVORITES_KEY, FavoritesOrder, ParseOrderError};
use crate::http::DEFAULT_USER_AGENT;

/// Top-level application configuration.
///
/// Every field has a default, so a config file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub favorites: FavoritesConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    /// Favorites file; the platform data directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_sort: String,
    pub default_favorites_order: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("built-in API URL is valid"),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_sort: SortSelector::default().to_string(),
            default_favorites_order: FavoritesOrder::default().to_string(),
        }
    }
}

impl Config {
    /// Load config from an explicit file, or from the platform config file
    /// if it exists, falling back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_file(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a config file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Path to the user config file (XDG on Linux, AppData on Windows)
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Where favorites are persisted
    pub fn favorites_path(&self) -> PathBuf {
        let file_name = format!("{FAVORITES_KEY}.json");
        self.favorites.path.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|d| d.data_dir().join(&file_name))
                .unwrap_or_else(|| PathBuf::from(&file_name))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn default_sort(&self) -> SortSelector {
        SortSelector::parse(&self.display.default_sort)
    }

    pub fn default_favorites_order(&self) -> Result<FavoritesOrder, ParseOrderError> {
        self.display.default_favorites_order.parse()
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "podshelf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

    #[test]
    fn shipped_default_file_matches_builtin_defaults() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn builtin_defaults() {
        let config = Config::default();

        assert_eq!(config.api.base_url.as_str(), "https://podcast-api.netlify.app/");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.default_sort(), SortSelector::Alphabetical);
        assert_eq!(
            config.default_favorites_order().unwrap(),
            FavoritesOrder::NewestFirst
        );
        assert!(
            config
                .favorites_path()
                .ends_with("podcastFavorites.json")
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:8080/\"\n\n[favorites]\npath = \"/tmp/favs.json\"\n",
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();

        assert_eq!(config.api.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.favorites_path(), PathBuf::from("/tmp/favs.json"));
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn display_preferences_are_parsed() {
        let config: Config = toml::from_str(
            "[display]\ndefault_sort = \"genre-comedy\"\ndefault_favorites_order = \"za\"\n",
        )
        .unwrap();

        assert_eq!(config.default_sort(), SortSelector::Genre(4));
        assert_eq!(
            config.default_favorites_order().unwrap(),
            FavoritesOrder::TitleDescending
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = Config::load(Some(dir.path().join("missing.toml").as_path()));
        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(
            Config::load_file(&path),
            Err(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
