// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use crate::error::StoreError;

use super::entry::FavoriteEntry;

/// Fixed name under which the favorites collection is persisted
pub const FAVORITES_KEY: &str = "podcastFavorites";

/// Persistence for the favorites collection.
///
/// `load` returns an empty collection when nothing was stored yet. `save`
/// replaces the whole stored collection.
pub trait FavoritesBackend {
    fn load(&self) -> Result<Vec<FavoriteEntry>, StoreError>;

    fn save(&mut self, entries: &[FavoriteEntry]) -> Result<(), StoreError>;
}

fn decode(raw: &str) -> Result<Vec<FavoriteEntry>, StoreError> {
    serde_json::from_str(raw).map_err(StoreError::Malformed)
}

fn encode(entries: &[FavoriteEntry]) -> Result<String, StoreError> {
    serde_json::to_string_pretty(entries).map_err(StoreError::SerializeFailed)
}

/// Stores favorites as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend writing `podcastFavorites.json` inside a directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{FAVORITES_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn partial_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".partial");
        PathBuf::from(name)
    }
}

impl FavoritesBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<FavoriteEntry>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        decode(&content)
    }

    fn save(&mut self, entries: &[FavoriteEntry]) -> Result<(), StoreError> {
        let json = encode(entries)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::WriteFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        // Write beside the target, then rename over it
        let partial = self.partial_path();
        std::fs::write(&partial, json).map_err(|e| StoreError::WriteFailed {
            path: partial.clone(),
            source: e,
        })?;
        std::fs::rename(&partial, &self.path).map_err(|e| StoreError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %self.path.display(), count = entries.len(), "favorites saved");
        Ok(())
    }
}

/// Keeps the serialized collection in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    raw: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from arbitrary stored content, valid or not
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    /// The currently stored content, if anything was ever stored
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl FavoritesBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<FavoriteEntry>, StoreError> {
        match &self.raw {
            Some(raw) => decode(raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, entries: &[FavoriteEntry]) -> Result<(), StoreError> {
        self.raw = Some(encode(entries)?);
        Ok(())
    }
}
