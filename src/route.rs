// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

/// A navigable view of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Podcasts,
    Podcast { id: String },
    Season { id: String, season_number: u32 },
    Favorites,
    NotFound { path: String },
}

impl Route {
    /// Map a path to its view. Paths that match nothing map to `NotFound`.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["podcasts"] => Route::Podcasts,
            ["podcasts", id] => Route::Podcast { id: id.to_string() },
            ["podcasts", id, "season", season] => match season.parse() {
                Ok(season_number) => Route::Season {
                    id: id.to_string(),
                    season_number,
                },
                Err(_) => Route::not_found(path),
            },
            ["favourites"] | ["favorites"] => Route::Favorites,
            _ => Route::not_found(path),
        }
    }

    fn not_found(path: &str) -> Self {
        Route::NotFound {
            path: path.trim().to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Podcasts => f.write_str("/podcasts"),
            Route::Podcast { id } => write!(f, "/podcasts/{id}"),
            Route::Season { id, season_number } => {
                write!(f, "/podcasts/{id}/season/{season_number}")
            }
            Route::Favorites => f.write_str("/favourites"),
            Route::NotFound { path } => f.write_str(path),
        }
    }
}
