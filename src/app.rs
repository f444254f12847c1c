// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::future::Future;

use crate::catalog::{CatalogClient, PodcastDetail, PodcastPreview, SortSelector, sort_podcasts};
use crate::error::AppError;
use crate::favorites::{EpisodeKey, FavoriteEntry, FavoritesBackend, FavoritesStore, Toggled};
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, Resource, SharedProgressReporter};
use crate::state::{FetchState, ViewScope};

/// The podcast currently being viewed. Only one is kept at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentDetail {
    pub id: String,
    pub state: FetchState<PodcastDetail>,
}

/// Application state shared by all views.
///
/// Holds the catalog, the podcast being viewed and the favorites store.
/// Fetches run inside a caller-supplied [`ViewScope`] so that tearing a
/// view down discards its pending responses.
pub struct App<C: HttpClient, B: FavoritesBackend> {
    catalog_client: CatalogClient<C>,
    favorites: FavoritesStore<B>,
    reporter: SharedProgressReporter,
    catalog: FetchState<Vec<PodcastPreview>>,
    detail: Option<CurrentDetail>,
}

impl<C: HttpClient, B: FavoritesBackend> App<C, B> {
    pub fn new(
        catalog_client: CatalogClient<C>,
        favorites: FavoritesStore<B>,
        reporter: SharedProgressReporter,
    ) -> Self {
        Self {
            catalog_client,
            favorites,
            reporter,
            catalog: FetchState::Loading,
            detail: None,
        }
    }

    /// Fetch the full catalog
    pub async fn load_catalog(&mut self, scope: &ViewScope) -> &FetchState<Vec<PodcastPreview>> {
        self.catalog = FetchState::Loading;

        let outcome = track(
            &self.reporter,
            Resource::Catalog,
            scope.settle(self.catalog_client.fetch_catalog()),
        )
        .await;

        if let Some(state) = outcome {
            self.catalog = state;
        }
        &self.catalog
    }

    pub fn catalog(&self) -> &FetchState<Vec<PodcastPreview>> {
        &self.catalog
    }

    /// The catalog as it should be displayed for a selector
    pub fn sorted_catalog(&self, selector: &SortSelector) -> FetchState<Vec<PodcastPreview>> {
        self.catalog
            .clone()
            .map(|podcasts| sort_podcasts(&podcasts, selector))
    }

    /// Fetch a podcast and make it the current one. Always issues a request.
    pub async fn open_podcast(&mut self, id: &str, scope: &ViewScope) -> &FetchState<PodcastDetail> {
        let detail = self.detail.insert(CurrentDetail {
            id: id.to_string(),
            state: FetchState::Loading,
        });

        let outcome = track(
            &self.reporter,
            Resource::Podcast { id: id.to_string() },
            scope.settle(self.catalog_client.fetch_detail(id)),
        )
        .await;

        if let Some(state) = outcome {
            detail.state = state;
        }
        &detail.state
    }

    /// Make a podcast current, reusing it if it is already loaded
    pub async fn ensure_podcast(&mut self, id: &str, scope: &ViewScope) -> &FetchState<PodcastDetail> {
        let loaded = self
            .detail
            .as_ref()
            .is_some_and(|current| current.id == id && current.state.ready().is_some());

        if !loaded {
            return self.open_podcast(id, scope).await;
        }

        &self
            .detail
            .get_or_insert_with(|| CurrentDetail {
                id: id.to_string(),
                state: FetchState::Loading,
            })
            .state
    }

    pub fn current_detail(&self) -> Option<&CurrentDetail> {
        self.detail.as_ref()
    }

    /// Toggle an episode of a podcast as favorite, fetching the podcast if needed
    pub async fn toggle_favorite(
        &mut self,
        key: &EpisodeKey,
        scope: &ViewScope,
    ) -> Result<Toggled, AppError> {
        let entry = {
            let detail = ready_or_err(self.ensure_podcast(&key.podcast_id, scope).await)?;
            favorite_entry_for(detail, key)?
        };

        Ok(self.favorites.toggle(entry)?)
    }

    pub fn favorites(&self) -> &FavoritesStore<B> {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore<B> {
        &mut self.favorites
    }
}

/// Build the favorite entry for an episode of a loaded podcast
pub fn favorite_entry_for(detail: &PodcastDetail, key: &EpisodeKey) -> Result<FavoriteEntry, AppError> {
    let season = detail
        .season(key.season_number)
        .ok_or_else(|| AppError::SeasonNotFound {
            podcast_id: key.podcast_id.clone(),
            season_number: key.season_number,
        })?;

    let episode = season
        .episode(key.episode_number)
        .ok_or_else(|| AppError::EpisodeNotFound {
            podcast_id: key.podcast_id.clone(),
            season_number: key.season_number,
            episode_number: key.episode_number,
        })?;

    Ok(FavoriteEntry::new(detail, season, episode))
}

fn ready_or_err<T>(state: &FetchState<T>) -> Result<&T, AppError> {
    match state {
        FetchState::Ready(data) => Ok(data),
        FetchState::Failed(message) => Err(AppError::FetchFailed(message.clone())),
        FetchState::Loading => Err(AppError::Cancelled),
    }
}

// Report start and outcome of a scoped fetch
async fn track<T, F>(
    reporter: &SharedProgressReporter,
    resource: Resource,
    settled: F,
) -> Option<FetchState<T>>
where
    F: Future<Output = Option<FetchState<T>>>,
{
    reporter.report(ProgressEvent::FetchStarted {
        resource: resource.clone(),
    });

    let outcome = settled.await;
    let event = match &outcome {
        Some(FetchState::Failed(error)) => ProgressEvent::FetchFailed {
            resource,
            error: error.clone(),
        },
        Some(_) => ProgressEvent::FetchCompleted { resource },
        None => ProgressEvent::FetchCancelled { resource },
    };
    reporter.report(event);

    outcome
}
