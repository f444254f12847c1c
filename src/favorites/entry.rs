// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Episode, PodcastDetail, Season};

/// Identifies one episode within one season of one podcast
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EpisodeKey {
    pub podcast_id: String,
    pub season_number: u32,
    pub episode_number: u32,
}

impl EpisodeKey {
    pub fn new(podcast_id: impl Into<String>, season_number: u32, episode_number: u32) -> Self {
        Self {
            podcast_id: podcast_id.into(),
            season_number,
            episode_number,
        }
    }
}

impl fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "podcast {} season {} episode {}",
            self.podcast_id, self.season_number, self.episode_number
        )
    }
}

/// A bookmarked episode, stored with enough context to render without a fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub podcast_id: String,
    #[serde(default)]
    pub podcast_title: String,
    pub season_number: u32,
    #[serde(default)]
    pub season_title: String,
    pub episode: Episode,
    /// When the entry was added; absent in entries written by older versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl FavoriteEntry {
    /// Build an entry for an episode of a fetched podcast
    pub fn new(podcast: &PodcastDetail, season: &Season, episode: &Episode) -> Self {
        Self {
            podcast_id: podcast.id.clone(),
            podcast_title: podcast.title.clone(),
            season_number: season.season_number,
            season_title: season.title.clone(),
            episode: episode.clone(),
            added_at: None,
        }
    }

    pub fn key(&self) -> EpisodeKey {
        EpisodeKey::new(
            self.podcast_id.clone(),
            self.season_number,
            self.episode.episode_number,
        )
    }

    pub fn matches(&self, key: &EpisodeKey) -> bool {
        self.podcast_id == key.podcast_id
            && self.season_number == key.season_number
            && self.episode.episode_number == key.episode_number
    }

    /// Route path of the season this episode belongs to
    pub fn season_path(&self) -> String {
        format!("/podcasts/{}/season/{}", self.podcast_id, self.season_number)
    }
}

/// Ordering of the favorites list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoritesOrder {
    /// Most recently added first
    #[default]
    NewestFirst,
    /// Order in which entries were added
    OldestFirst,
    /// Episode title A to Z
    TitleAscending,
    /// Episode title Z to A
    TitleDescending,
}

impl FavoritesOrder {
    pub fn label(&self) -> &'static str {
        match self {
            FavoritesOrder::NewestFirst => "Recently added",
            FavoritesOrder::OldestFirst => "Oldest first",
            FavoritesOrder::TitleAscending => "A to Z",
            FavoritesOrder::TitleDescending => "Z to A",
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown favorites order '{0}' (expected newest, oldest, az or za)")]
pub struct ParseOrderError(String);

impl FromStr for FavoritesOrder {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "recently-added" => Ok(FavoritesOrder::NewestFirst),
            "oldest" | "least-recently-added" => Ok(FavoritesOrder::OldestFirst),
            "az" | "a-z" => Ok(FavoritesOrder::TitleAscending),
            "za" | "z-a" => Ok(FavoritesOrder::TitleDescending),
            _ => Err(ParseOrderError(s.to_string())),
        }
    }
}

impl fmt::Display for FavoritesOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FavoritesOrder::NewestFirst => "newest",
            FavoritesOrder::OldestFirst => "oldest",
            FavoritesOrder::TitleAscending => "az",
            FavoritesOrder::TitleDescending => "za",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_entries_written_by_the_browser_app() {
        let raw = r#"{
            "podcastId": "10716",
            "podcastTitle": "Something Was Wrong",
            "seasonNumber": 1,
            "seasonTitle": "Season 1",
            "episode": {
                "title": "S1 E1 | The Diagnosis",
                "description": "First episode",
                "episode": 1,
                "file": "https://example.com/s1e1.mp3"
            }
        }"#;

        let entry: FavoriteEntry = serde_json::from_str(raw).unwrap();

        assert_eq!(entry.key(), EpisodeKey::new("10716", 1, 1));
        assert!(entry.added_at.is_none());
        assert_eq!(entry.season_path(), "/podcasts/10716/season/1");
    }

    #[test]
    fn serializes_camel_case_fields() {
        let entry = FavoriteEntry {
            podcast_id: "1".to_string(),
            podcast_title: "Zeta".to_string(),
            season_number: 2,
            season_title: "Two".to_string(),
            episode: Episode {
                episode_number: 5,
                title: "Five".to_string(),
                description: String::new(),
                audio_url: None,
            },
            added_at: None,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["podcastId"], "1");
        assert_eq!(json["seasonNumber"], 2);
        assert_eq!(json["episode"]["episode"], 5);
        assert!(json.get("addedAt").is_none());
    }

    #[test]
    fn order_parses_short_and_long_names() {
        assert_eq!("newest".parse::<FavoritesOrder>().unwrap(), FavoritesOrder::NewestFirst);
        assert_eq!(
            "least-recently-added".parse::<FavoritesOrder>().unwrap(),
            FavoritesOrder::OldestFirst
        );
        assert_eq!("AZ".parse::<FavoritesOrder>().unwrap(), FavoritesOrder::TitleAscending);
        assert_eq!("z-a".parse::<FavoritesOrder>().unwrap(), FavoritesOrder::TitleDescending);
        assert!("shuffle".parse::<FavoritesOrder>().is_err());
    }

    #[test]
    fn order_display_parses_back() {
        for order in [
            FavoritesOrder::NewestFirst,
            FavoritesOrder::OldestFirst,
            FavoritesOrder::TitleAscending,
            FavoritesOrder::TitleDescending,
        ] {
            assert_eq!(order.to_string().parse::<FavoritesOrder>().unwrap(), order);
        }
    }
}
