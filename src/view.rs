// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Terminal renderings of each view.
//!
//! Every function returns the finished text so views can be printed or
//! inspected in tests. Optional fields that are absent are simply left out.

use chrono::{DateTime, Utc};
use colored::Colorize;
use console::Emoji;

use crate::catalog::{Genre, PodcastDetail, PodcastPreview, SortSelector, genre_label};
use crate::favorites::{FavoriteEntry, FavoritesOrder};
use crate::route::Route;
use crate::state::FetchState;

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static HEART: Emoji<'_, '_> = Emoji("❤️  ", "[*] ");
static EMPTY_HEART: Emoji<'_, '_> = Emoji("🤍 ", "[ ] ");
static SPEAKER: Emoji<'_, '_> = Emoji("🔊 ", "");
static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");

/// Genre chips shown per podcast before collapsing into "+N more"
const MAX_GENRE_CHIPS: usize = 3;

/// Width descriptions are cut to in list views
const DESCRIPTION_WIDTH: usize = 160;

pub fn render_home() -> String {
    format!(
        "\n{}{}{}\n{}\n\n  {} {}\n  {} {}\n",
        MICROPHONE,
        "Pod".bold(),
        "shelf".bold().blue(),
        "Your one-stop destination for all your podcast needs.".dimmed(),
        "Browse:".bold(),
        Route::Podcasts.to_string().cyan(),
        "Favourites:".bold(),
        Route::Favorites.to_string().cyan(),
    )
}

pub fn render_not_found(path: &str) -> String {
    format!(
        "\n{}{}\n{}\n\n  {} {}\n",
        "404 ".bold().blue(),
        "Page Not Found".red(),
        path.dimmed(),
        "Home:".bold(),
        Route::Home.to_string().cyan()
    )
}

/// Message for a fetch that has not produced data
pub fn render_pending<T>(state: &FetchState<T>) -> Option<String> {
    match state {
        FetchState::Loading => Some("Loading...".dimmed().to_string()),
        FetchState::Failed(error) => Some(format!("{FAILURE}{} {}", "Error:".red().bold(), error.red())),
        FetchState::Ready(_) => None,
    }
}

pub fn render_catalog(podcasts: &[PodcastPreview], selector: &SortSelector) -> String {
    let mut lines = vec![
        String::new(),
        format!("{}{}", "Pod".bold(), "casts".bold().blue()),
        format!("{CALENDAR}{}", selector.label().dimmed()),
        String::new(),
    ];

    if podcasts.is_empty() {
        lines.push(format!("  {}", "No podcasts match this selection.".dimmed()));
        return lines.join("\n");
    }

    for podcast in podcasts {
        lines.push(match podcast.updated {
            Some(updated) => format!("  {}  {}", podcast.title.bold(), short_date(&updated).blue()),
            None => format!("  {}", podcast.title.bold()),
        });

        let genres = genre_chips(podcast);
        if !genres.is_empty() {
            lines.push(format!("    {}", genres.dimmed()));
        }

        let route = Route::Podcast {
            id: podcast.id.clone(),
        };
        lines.push(format!("    {}", route.to_string().cyan()));
    }

    lines.join("\n")
}

/// Available sort and filter selectors
pub fn render_selectors() -> String {
    let orders = [
        SortSelector::Alphabetical,
        SortSelector::ReverseAlphabetical,
        SortSelector::RecentlyUpdated,
        SortSelector::LeastRecentlyUpdated,
    ]
    .into_iter()
    .map(|selector| selector_line(&selector, &selector.label()));

    let genres = Genre::ALL
        .into_iter()
        .map(|genre| selector_line(&SortSelector::Genre(genre.id()), genre.title()));

    std::iter::once("Order".bold().to_string())
        .chain(orders)
        .chain(std::iter::once("Genres".bold().to_string()))
        .chain(genres)
        .collect::<Vec<_>>()
        .join("\n")
}

fn selector_line(selector: &SortSelector, description: &str) -> String {
    format!("  {:<28} {}", selector.to_string().cyan(), description)
}

pub fn render_podcast(detail: &PodcastDetail) -> String {
    let mut lines = vec![String::new(), detail.title.bold().to_string()];

    if let Some(image) = &detail.image {
        lines.push(image.dimmed().to_string());
    }
    let description = decode(&detail.description);
    if !description.is_empty() {
        lines.push(String::new());
        lines.push(description);
    }

    lines.push(String::new());
    lines.push("Seasons".bold().to_string());
    if detail.seasons.is_empty() {
        lines.push(format!("  {}", "No seasons available".dimmed()));
    }
    for season in &detail.seasons {
        let route = Route::Season {
            id: detail.id.clone(),
            season_number: season.season_number,
        };
        lines.push(format!(
            "  {}  {} {}",
            season.title,
            format!("({} episodes)", season.episodes.len()).dimmed(),
            route.to_string().cyan()
        ));
    }

    lines.push(String::new());
    lines.push(format!("{} {}", "Back:".dimmed(), Route::Podcasts.to_string().cyan()));
    lines.join("\n")
}

/// Render one season, marking episodes for which `is_favorite` holds
pub fn render_season<F>(detail: &PodcastDetail, season_number: u32, is_favorite: F) -> String
where
    F: Fn(u32) -> bool,
{
    let back = Route::Podcast {
        id: detail.id.clone(),
    };

    let Some(season) = detail.season(season_number) else {
        return [
            String::new(),
            "Season not found".red().to_string(),
            format!("{} {}", "Back to Podcast:".dimmed(), back.to_string().cyan()),
        ]
        .join("\n");
    };

    let mut lines = vec![
        String::new(),
        detail.title.dimmed().to_string(),
        season.title.bold().to_string(),
    ];
    if let Some(image) = season.image.as_ref().or(detail.image.as_ref()) {
        lines.push(image.dimmed().to_string());
    }
    if let Some(description) = season.description.as_deref().map(decode)
        && !description.is_empty()
    {
        lines.push(String::new());
        lines.push(description);
    }

    lines.push(String::new());
    lines.push("Episodes".bold().to_string());
    if season.episodes.is_empty() {
        lines.push(format!("  {}", "No episodes available for this season".dimmed()));
    }
    for episode in &season.episodes {
        let marker = if is_favorite(episode.episode_number) {
            &HEART
        } else {
            &EMPTY_HEART
        };
        lines.push(format!(
            "  {marker}{}",
            format!("Episode {}: {}", episode.episode_number, episode.title).bold()
        ));

        let description = decode(&episode.description);
        if !description.is_empty() {
            lines.push(format!("      {}", truncate(&description, DESCRIPTION_WIDTH)));
        }
        if let Some(audio) = &episode.audio_url {
            lines.push(format!("      {SPEAKER}{}", audio.dimmed()));
        }
    }

    lines.push(String::new());
    lines.push(format!("{} {}", "Back:".dimmed(), back.to_string().cyan()));
    lines.join("\n")
}

pub fn render_favorites(entries: &[&FavoriteEntry], order: FavoritesOrder) -> String {
    let mut lines = vec![
        String::new(),
        format!("{} {}", "Your Favorite".bold(), "Episodes".bold().blue()),
    ];

    if entries.is_empty() {
        lines.push(String::new());
        lines.push(format!("  {}", "You haven't added any favorites yet.".dimmed()));
        lines.push(format!(
            "  {} {}",
            "Browse Podcasts:".dimmed(),
            Route::Podcasts.to_string().cyan()
        ));
        return lines.join("\n");
    }

    lines.push(format!("Sort by: {}", order.label()).dimmed().to_string());

    for entry in entries {
        lines.push(String::new());
        lines.extend(favorite_lines(entry));
    }

    lines.join("\n")
}

fn favorite_lines(entry: &FavoriteEntry) -> Vec<String> {
    let episode = &entry.episode;
    let mut lines = vec![
        format!("{HEART}{}", entry.podcast_title.bold()),
        format!(
            "    {}",
            format!("{} • Episode {}", entry.season_title, episode.episode_number).dimmed()
        ),
        format!("    {}", episode.title.bold()),
    ];

    let description = decode(&episode.description);
    if !description.is_empty() {
        lines.push(format!("    {}", truncate(&description, DESCRIPTION_WIDTH)));
    }
    if let Some(audio) = &episode.audio_url {
        lines.push(format!("    {SPEAKER}{}", audio.dimmed()));
    }
    if let Some(added_at) = entry.added_at {
        lines.push(format!("    {}", format!("Added {}", short_date(&added_at)).dimmed()));
    }
    lines.push(format!(
        "    {} {}",
        "View Full Season:".dimmed(),
        entry.season_path().cyan()
    ));
    lines
}

/// Up to three genre titles, then a "+N more" count
fn genre_chips(podcast: &PodcastPreview) -> String {
    let ids = podcast.genre_ids();
    let mut chips: Vec<String> = ids
        .iter()
        .take(MAX_GENRE_CHIPS)
        .map(|id| genre_label(*id))
        .collect();

    if ids.len() > MAX_GENRE_CHIPS {
        chips.push(format!("+{} more", ids.len() - MAX_GENRE_CHIPS));
    }
    chips.join(" · ")
}

fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d").to_string()
}

fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text.trim()).into_owned()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut.trim_end())
    }
}
