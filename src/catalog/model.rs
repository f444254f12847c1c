// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary record of a podcast as listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodcastPreview {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Number of seasons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<u32>,
    #[serde(default)]
    pub genres: Vec<u32>,
    /// Single-genre field used by older catalog entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<u32>,
    #[serde(
        default,
        with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
}

impl PodcastPreview {
    /// Whether this podcast is tagged with the given genre id
    pub fn has_genre(&self, genre_id: u32) -> bool {
        self.genres.contains(&genre_id) || self.genre == Some(genre_id)
    }

    /// Genre ids in display order, falling back to the legacy field
    pub fn genre_ids(&self) -> Vec<u32> {
        if self.genres.is_empty() {
            self.genre.into_iter().collect()
        } else {
            self.genres.clone()
        }
    }
}

/// Full record of a podcast including its season and episode tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodcastDetail {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(
        default,
        with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
}

impl PodcastDetail {
    pub fn season(&self, season_number: u32) -> Option<&Season> {
        self.seasons
            .iter()
            .find(|season| season.season_number == season_number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    #[serde(rename = "season")]
    pub season_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Season {
    pub fn episode(&self, episode_number: u32) -> Option<&Episode> {
        self.episodes
            .iter()
            .find(|episode| episode.episode_number == episode_number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(rename = "episode")]
    pub episode_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "file", default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Timestamps as served by the catalog API.
///
/// Accepts RFC 3339 (`2022-11-03T07:00:00.000Z`) and bare dates
/// (`2024-01-01`, midnight UTC). Anything else, including `null`,
/// deserializes to `None` so one odd record never fails a whole catalog.
pub(crate) mod lenient_timestamp {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE_PREVIEW: &str = r#"{
        "id": "10716",
        "title": "Something Was Wrong",
        "description": "Something Was Wrong is an Iris Award-winning true-crime docuseries",
        "seasons": 14,
        "image": "https://example.com/swr.jpg",
        "genres": [2, 1],
        "updated": "2022-11-03T07:00:00.000Z"
    }"#;

    const SAMPLE_DETAIL: &str = r#"{
        "id": "10716",
        "title": "Something Was Wrong",
        "description": "A docuseries",
        "image": "https://example.com/swr.jpg",
        "genres": ["Investigative Journalism"],
        "seasons": [
            {
                "season": 1,
                "title": "Season 1",
                "image": "https://example.com/s1.jpg",
                "episodes": [
                    {
                        "title": "S1 E1 | The Diagnosis",
                        "description": "First episode",
                        "episode": 1,
                        "file": "https://example.com/s1e1.mp3"
                    },
                    { "title": "S1 E2", "episode": 2 }
                ]
            },
            { "season": 2, "title": "Season 2" }
        ],
        "updated": "2022-11-03T07:00:00.000Z"
    }"#;

    #[test]
    fn preview_parses_api_fields() {
        let preview: PodcastPreview = serde_json::from_str(SAMPLE_PREVIEW).unwrap();

        assert_eq!(preview.id, "10716");
        assert_eq!(preview.title, "Something Was Wrong");
        assert_eq!(preview.seasons, Some(14));
        assert_eq!(preview.genres, vec![2, 1]);
        assert_eq!(
            preview.updated,
            Some(Utc.with_ymd_and_hms(2022, 11, 3, 7, 0, 0).unwrap())
        );
    }

    #[test]
    fn preview_tolerates_missing_fields() {
        let preview: PodcastPreview = serde_json::from_str(r#"{"id": "1"}"#).unwrap();

        assert_eq!(preview.title, "");
        assert!(preview.genres.is_empty());
        assert!(preview.image.is_none());
        assert!(preview.updated.is_none());
    }

    #[test]
    fn preview_accepts_bare_dates_and_ignores_garbage() {
        let dated: PodcastPreview =
            serde_json::from_str(r#"{"id": "1", "updated": "2024-06-01"}"#).unwrap();
        assert_eq!(
            dated.updated,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );

        let garbage: PodcastPreview =
            serde_json::from_str(r#"{"id": "1", "updated": "last tuesday"}"#).unwrap();
        assert!(garbage.updated.is_none());

        let numeric: PodcastPreview =
            serde_json::from_str(r#"{"id": "1", "updated": 12}"#).unwrap();
        assert!(numeric.updated.is_none());
    }

    #[test]
    fn legacy_genre_field_counts_as_genre() {
        let preview: PodcastPreview =
            serde_json::from_str(r#"{"id": "1", "genre": 4}"#).unwrap();

        assert!(preview.has_genre(4));
        assert!(!preview.has_genre(5));
        assert_eq!(preview.genre_ids(), vec![4]);
    }

    #[test]
    fn detail_parses_season_tree() {
        let detail: PodcastDetail = serde_json::from_str(SAMPLE_DETAIL).unwrap();

        assert_eq!(detail.seasons.len(), 2);

        let season = detail.season(1).unwrap();
        assert_eq!(season.title, "Season 1");
        assert_eq!(season.episodes.len(), 2);

        let episode = season.episode(1).unwrap();
        assert_eq!(episode.title, "S1 E1 | The Diagnosis");
        assert_eq!(
            episode.audio_url.as_deref(),
            Some("https://example.com/s1e1.mp3")
        );

        let bare = season.episode(2).unwrap();
        assert_eq!(bare.description, "");
        assert!(bare.audio_url.is_none());

        assert!(detail.season(2).unwrap().episodes.is_empty());
        assert!(detail.season(3).is_none());
    }

    #[test]
    fn episode_serializes_with_wire_names() {
        let episode = Episode {
            episode_number: 3,
            title: "Three".to_string(),
            description: "Third".to_string(),
            audio_url: None,
        };

        let json = serde_json::to_value(&episode).unwrap();
        assert_eq!(json["episode"], 3);
        assert!(json.get("file").is_none());
    }
}
