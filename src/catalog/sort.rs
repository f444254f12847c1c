// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;
use std::fmt;

use super::genre::{Genre, genre_label};
use super::model::PodcastPreview;

/// How the catalog list is ordered or filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortSelector {
    #[default]
    Alphabetical,
    ReverseAlphabetical,
    RecentlyUpdated,
    LeastRecentlyUpdated,
    /// Keep only podcasts tagged with this genre id
    Genre(u32),
    /// Catalog order as served
    Unsorted,
}

impl SortSelector {
    /// Parse a selector name. Unknown names fall back to `Unsorted`.
    ///
    /// Genre filters are written `genre-<slug>` (e.g. `genre-comedy`) or
    /// `genre-<id>` (e.g. `genre-4`).
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "alphabetical" => SortSelector::Alphabetical,
            "reverse-alphabetical" => SortSelector::ReverseAlphabetical,
            "recently-updated" => SortSelector::RecentlyUpdated,
            "least-recently-updated" => SortSelector::LeastRecentlyUpdated,
            other => other
                .strip_prefix("genre-")
                .and_then(|rest| {
                    Genre::from_slug(rest)
                        .map(Genre::id)
                        .or_else(|| rest.parse().ok())
                })
                .map(SortSelector::Genre)
                .unwrap_or(SortSelector::Unsorted),
        }
    }

    /// Indicator text shown above the list
    pub fn label(&self) -> String {
        match self {
            SortSelector::Alphabetical => "Sorted by: A to Z".to_string(),
            SortSelector::ReverseAlphabetical => "Sorted by: Z to A".to_string(),
            SortSelector::RecentlyUpdated => "Sorted by: Most recent".to_string(),
            SortSelector::LeastRecentlyUpdated => "Sorted by: Oldest first".to_string(),
            SortSelector::Genre(id) => format!("Filtered by: {}", genre_label(*id)),
            SortSelector::Unsorted => "Sorted by: Catalog order".to_string(),
        }
    }

    pub fn is_filter(&self) -> bool {
        matches!(self, SortSelector::Genre(_))
    }
}

impl fmt::Display for SortSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortSelector::Alphabetical => f.write_str("alphabetical"),
            SortSelector::ReverseAlphabetical => f.write_str("reverse-alphabetical"),
            SortSelector::RecentlyUpdated => f.write_str("recently-updated"),
            SortSelector::LeastRecentlyUpdated => f.write_str("least-recently-updated"),
            SortSelector::Genre(id) => match Genre::from_id(*id) {
                Some(genre) => write!(f, "genre-{}", genre.slug()),
                None => write!(f, "genre-{id}"),
            },
            SortSelector::Unsorted => f.write_str("unsorted"),
        }
    }
}

/// Case-aware title comparison: case-insensitive first, raw text as tiebreak
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Produce the display list for a selector. The input is never modified.
pub fn sort_podcasts(podcasts: &[PodcastPreview], selector: &SortSelector) -> Vec<PodcastPreview> {
    let mut sorted = podcasts.to_vec();

    match selector {
        SortSelector::Alphabetical => {
            sorted.sort_by(compare_alphabetical);
        }
        SortSelector::ReverseAlphabetical => {
            sorted.sort_by(|a, b| compare_alphabetical(b, a));
        }
        SortSelector::RecentlyUpdated => {
            sorted.sort_by(|a, b| compare_updated(a, b, true));
        }
        SortSelector::LeastRecentlyUpdated => {
            sorted.sort_by(|a, b| compare_updated(a, b, false));
        }
        SortSelector::Genre(id) => {
            sorted.retain(|podcast| podcast.has_genre(*id));
        }
        SortSelector::Unsorted => {}
    }

    sorted
}

// Titles first, then id, so podcasts sharing a title still have a fixed order
fn compare_alphabetical(a: &PodcastPreview, b: &PodcastPreview) -> Ordering {
    compare_titles(&a.title, &b.title).then_with(|| a.id.cmp(&b.id))
}

// Undated podcasts go last in both directions
fn compare_updated(a: &PodcastPreview, b: &PodcastPreview, newest_first: bool) -> Ordering {
    match (a.updated, b.updated) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::lenient_timestamp;

    fn make_podcast(id: &str, title: &str, updated: Option<&str>, genres: &[u32]) -> PodcastPreview {
        PodcastPreview {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            image: None,
            seasons: None,
            genres: genres.to_vec(),
            genre: None,
            updated: updated.and_then(lenient_timestamp::parse),
        }
    }

    fn titles(podcasts: &[PodcastPreview]) -> Vec<&str> {
        podcasts.iter().map(|p| p.title.as_str()).collect()
    }

    fn sample_catalog() -> Vec<PodcastPreview> {
        vec![
            make_podcast("1", "Zeta", Some("2024-01-01"), &[1, 4]),
            make_podcast("2", "Alpha", Some("2024-06-01"), &[3]),
            make_podcast("3", "mango", Some("2023-03-15T10:00:00Z"), &[4]),
            make_podcast("4", "Beta", None, &[]),
            make_podcast("5", "alpha", Some("2024-06-01"), &[9]),
        ]
    }

    #[test]
    fn alphabetical_and_recency_scenario() {
        let catalog = vec![
            make_podcast("1", "Zeta", Some("2024-01-01"), &[]),
            make_podcast("2", "Alpha", Some("2024-06-01"), &[]),
        ];

        let alphabetical = sort_podcasts(&catalog, &SortSelector::Alphabetical);
        assert_eq!(titles(&alphabetical), vec!["Alpha", "Zeta"]);

        let recent = sort_podcasts(&catalog, &SortSelector::RecentlyUpdated);
        assert_eq!(titles(&recent), vec!["Alpha", "Zeta"]);

        let oldest = sort_podcasts(&catalog, &SortSelector::LeastRecentlyUpdated);
        assert_eq!(titles(&oldest), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn alphabetical_ignores_case_first() {
        let sorted = sort_podcasts(&sample_catalog(), &SortSelector::Alphabetical);
        assert_eq!(titles(&sorted), vec!["Alpha", "alpha", "Beta", "mango", "Zeta"]);
    }

    #[test]
    fn inverse_alphabetical_selectors_reverse_each_other() {
        let catalog = sample_catalog();

        for (first, inverse) in [
            (SortSelector::Alphabetical, SortSelector::ReverseAlphabetical),
            (SortSelector::ReverseAlphabetical, SortSelector::Alphabetical),
        ] {
            let once = sort_podcasts(&catalog, &first);
            let twice = sort_podcasts(&once, &inverse);

            let mut expected = once.clone();
            expected.reverse();
            assert_eq!(twice, expected);
        }
    }

    #[test]
    fn inverse_alphabetical_selectors_reverse_shared_titles() {
        let catalog = vec![
            make_podcast("1", "Serial", None, &[]),
            make_podcast("2", "Serial", None, &[]),
            make_podcast("3", "Alpha", None, &[]),
        ];

        fn ids(podcasts: &[PodcastPreview]) -> Vec<&str> {
            podcasts.iter().map(|p| p.id.as_str()).collect()
        }

        let reversed = sort_podcasts(&catalog, &SortSelector::ReverseAlphabetical);
        assert_eq!(ids(&reversed), vec!["2", "1", "3"]);

        let restored = sort_podcasts(&reversed, &SortSelector::Alphabetical);
        assert_eq!(ids(&restored), vec!["3", "1", "2"]);

        for (first, inverse) in [
            (SortSelector::Alphabetical, SortSelector::ReverseAlphabetical),
            (SortSelector::ReverseAlphabetical, SortSelector::Alphabetical),
        ] {
            let once = sort_podcasts(&catalog, &first);
            let mut expected = once.clone();
            expected.reverse();
            assert_eq!(sort_podcasts(&once, &inverse), expected);
        }
    }

    #[test]
    fn recency_keeps_ties_stable_and_undated_last() {
        let catalog = sample_catalog();

        let recent = sort_podcasts(&catalog, &SortSelector::RecentlyUpdated);
        assert_eq!(titles(&recent), vec!["Alpha", "alpha", "Zeta", "mango", "Beta"]);

        let oldest = sort_podcasts(&catalog, &SortSelector::LeastRecentlyUpdated);
        assert_eq!(titles(&oldest), vec!["mango", "Zeta", "Alpha", "alpha", "Beta"]);
    }

    #[test]
    fn genre_filter_keeps_order_and_only_matches() {
        let catalog = sample_catalog();

        let comedy = sort_podcasts(&catalog, &SortSelector::Genre(Genre::Comedy.id()));
        assert_eq!(titles(&comedy), vec!["Zeta", "mango"]);
        assert!(comedy.iter().all(|p| p.has_genre(4)));

        let news = sort_podcasts(&catalog, &SortSelector::Genre(Genre::News.id()));
        assert!(news.is_empty());
    }

    #[test]
    fn genre_filter_matches_legacy_field() {
        let mut legacy = make_podcast("9", "Legacy", None, &[]);
        legacy.genre = Some(6);
        let catalog = vec![legacy, make_podcast("1", "Modern", None, &[6])];

        let business = sort_podcasts(&catalog, &SortSelector::Genre(6));
        assert_eq!(titles(&business), vec!["Legacy", "Modern"]);
    }

    #[test]
    fn unsorted_returns_input_order_and_input_is_untouched() {
        let catalog = sample_catalog();
        let before = catalog.clone();

        let unsorted = sort_podcasts(&catalog, &SortSelector::parse("by-vibes"));
        assert_eq!(unsorted, before);

        let _ = sort_podcasts(&catalog, &SortSelector::ReverseAlphabetical);
        assert_eq!(catalog, before);
    }

    #[test]
    fn parse_recognizes_all_selectors() {
        assert_eq!(SortSelector::parse("alphabetical"), SortSelector::Alphabetical);
        assert_eq!(
            SortSelector::parse("reverse-alphabetical"),
            SortSelector::ReverseAlphabetical
        );
        assert_eq!(
            SortSelector::parse("recently-updated"),
            SortSelector::RecentlyUpdated
        );
        assert_eq!(
            SortSelector::parse("least-recently-updated"),
            SortSelector::LeastRecentlyUpdated
        );
        assert_eq!(
            SortSelector::parse("genre-kids-and-family"),
            SortSelector::Genre(9)
        );
        assert_eq!(SortSelector::parse("genre-2"), SortSelector::Genre(2));
        assert_eq!(SortSelector::parse("genre-jazz"), SortSelector::Unsorted);
        assert_eq!(SortSelector::parse(""), SortSelector::Unsorted);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for selector in [
            SortSelector::Alphabetical,
            SortSelector::ReverseAlphabetical,
            SortSelector::RecentlyUpdated,
            SortSelector::LeastRecentlyUpdated,
            SortSelector::Genre(3),
            SortSelector::Genre(77),
        ] {
            assert_eq!(SortSelector::parse(&selector.to_string()), selector);
        }
    }

    #[test]
    fn labels_describe_selector() {
        assert_eq!(SortSelector::Alphabetical.label(), "Sorted by: A to Z");
        assert_eq!(SortSelector::Genre(3).label(), "Filtered by: History");
        assert!(SortSelector::Genre(3).is_filter());
        assert!(!SortSelector::RecentlyUpdated.is_filter());
    }
}
