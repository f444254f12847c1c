use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when fetching the podcast catalog or a podcast detail
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API base URL cannot hold a path: {0}")]
    UnusableBaseUrl(String),
}

/// Errors that can occur when loading or persisting favorites
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read favorites file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write favorites file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored favorites are not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Failed to serialize favorites: {0}")]
    SerializeFailed(#[source] serde_json::Error),
}

/// Errors that can occur when loading or saving the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level errors for application commands
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    FetchFailed(String),

    #[error("Favorites error: {0}")]
    Store(#[from] StoreError),

    #[error("Podcast {podcast_id} has no season {season_number}")]
    SeasonNotFound {
        podcast_id: String,
        season_number: u32,
    },

    #[error("Season {season_number} of podcast {podcast_id} has no episode {episode_number}")]
    EpisodeNotFound {
        podcast_id: String,
        season_number: u32,
        episode_number: u32,
    },

    #[error("Fetch was cancelled")]
    Cancelled,
}
