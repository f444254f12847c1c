// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::CatalogError;
use crate::http::HttpClient;

use super::model::{PodcastDetail, PodcastPreview};

/// Base URL of the public podcast catalog API
pub const DEFAULT_API_URL: &str = "https://podcast-api.netlify.app";

/// Client for the podcast catalog API.
///
/// Every call is a single request with no retry. Detail requests are not
/// deduplicated: asking twice for the same podcast issues two requests.
#[derive(Clone)]
pub struct CatalogClient<C: HttpClient> {
    client: C,
    base_url: Url,
}

impl<C: HttpClient> CatalogClient<C> {
    pub fn new(client: C, base_url: Url) -> Result<Self, CatalogError> {
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::UnusableBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// Create a client for a base URL given as text
    pub fn from_base_str(client: C, base_url: &str) -> Result<Self, CatalogError> {
        Self::new(client, Url::parse(base_url)?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the full catalog listing (`<base>/`)
    pub fn catalog_url(&self) -> Result<Url, CatalogError> {
        self.endpoint(&[""])
    }

    /// URL of a single podcast (`<base>/id/<id>`)
    pub fn detail_url(&self, id: &str) -> Result<Url, CatalogError> {
        self.endpoint(&["id", id])
    }

    /// Fetch the full podcast catalog
    pub async fn fetch_catalog(&self) -> Result<Vec<PodcastPreview>, CatalogError> {
        let url = self.catalog_url()?;
        let podcasts: Vec<PodcastPreview> = self.get_json(&url).await?;
        tracing::debug!(count = podcasts.len(), "catalog loaded");
        Ok(podcasts)
    }

    /// Fetch one podcast with its seasons and episodes
    pub async fn fetch_detail(&self, id: &str) -> Result<PodcastDetail, CatalogError> {
        let url = self.detail_url(id)?;
        let detail: PodcastDetail = self.get_json(&url).await?;
        tracing::debug!(id, seasons = detail.seasons.len(), "podcast detail loaded");
        Ok(detail)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::UnusableBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, CatalogError> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.as_str())
            .await
            .map_err(|e| CatalogError::FetchFailed {
                url: url.to_string(),
                source: e,
            })?;

        if !response.is_success() {
            tracing::warn!(%url, status = response.status, "catalog API returned an error status");
            return Err(CatalogError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| CatalogError::DecodeFailed {
            url: url.to_string(),
            source: e,
        })
    }
}
