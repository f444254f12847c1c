// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use chrono::Utc;

use crate::catalog::compare_titles;
use crate::error::StoreError;

use super::backend::FavoritesBackend;
use super::entry::{EpisodeKey, FavoriteEntry, FavoritesOrder};

/// Outcome of toggling a favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Owns the favorites collection and writes it through to a backend.
///
/// Entries are kept in the order they were added, with at most one entry
/// per [`EpisodeKey`]. Every mutation is persisted before it returns; a
/// failed write leaves the in-memory collection unchanged.
#[derive(Debug)]
pub struct FavoritesStore<B: FavoritesBackend> {
    backend: B,
    entries: Vec<FavoriteEntry>,
}

impl<B: FavoritesBackend> FavoritesStore<B> {
    /// Open the store. Stored data that is missing or unreadable yields an
    /// empty collection.
    pub fn open(backend: B) -> Self {
        let entries = match backend.load() {
            Ok(entries) => dedupe(entries),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable favorites");
                Vec::new()
            }
        };

        Self { backend, entries }
    }

    pub fn is_favorite(&self, key: &EpisodeKey) -> bool {
        self.entries.iter().any(|entry| entry.matches(key))
    }

    /// Remove the entry if it is a favorite, add it otherwise
    pub fn toggle(&mut self, mut entry: FavoriteEntry) -> Result<Toggled, StoreError> {
        let key = entry.key();

        if self.is_favorite(&key) {
            self.mutate(|entries| entries.retain(|e| !e.matches(&key)))?;
            tracing::info!(%key, "removed favorite");
            Ok(Toggled::Removed)
        } else {
            if entry.added_at.is_none() {
                entry.added_at = Some(Utc::now());
            }
            self.mutate(|entries| entries.push(entry))?;
            tracing::info!(%key, "added favorite");
            Ok(Toggled::Added)
        }
    }

    /// Remove every entry matching the key, returning how many were removed
    pub fn remove(&mut self, key: &EpisodeKey) -> Result<usize, StoreError> {
        let before = self.entries.len();
        if !self.is_favorite(key) {
            return Ok(0);
        }

        self.mutate(|entries| entries.retain(|e| !e.matches(key)))?;
        tracing::info!(%key, "removed favorite");
        Ok(before - self.entries.len())
    }

    /// Favorites in the requested order
    pub fn list(&self, order: FavoritesOrder) -> Vec<&FavoriteEntry> {
        let mut listed: Vec<&FavoriteEntry> = self.entries.iter().collect();

        match order {
            FavoritesOrder::OldestFirst => {}
            FavoritesOrder::NewestFirst => listed.reverse(),
            FavoritesOrder::TitleAscending => {
                listed.sort_by(|a, b| compare_titles(&a.episode.title, &b.episode.title));
            }
            FavoritesOrder::TitleDescending => {
                listed.sort_by(|a, b| compare_titles(&a.episode.title, &b.episode.title));
                listed.reverse();
            }
        }

        listed
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn mutate<F>(&mut self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Vec<FavoriteEntry>),
    {
        let mut updated = self.entries.clone();
        change(&mut updated);
        self.backend.save(&updated)?;
        self.entries = updated;
        Ok(())
    }
}

// Keep the first entry for each key
fn dedupe(entries: Vec<FavoriteEntry>) -> Vec<FavoriteEntry> {
    let total = entries.len();
    let mut seen = HashSet::new();
    let unique: Vec<FavoriteEntry> = entries
        .into_iter()
        .filter(|entry| seen.insert(entry.key()))
        .collect();

    if unique.len() < total {
        tracing::warn!(
            dropped = total - unique.len(),
            "dropped duplicate favorites from stored data"
        );
    }
    unique
}
