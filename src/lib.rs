pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod http;
pub mod progress;
pub mod route;
pub mod state;
pub mod view;

// Re-export main types for convenience
pub use app::{App, CurrentDetail, favorite_entry_for};
pub use catalog::{
    CatalogClient, Episode, Genre, PodcastDetail, PodcastPreview, Season, SortSelector,
    sort_podcasts,
};
pub use config::Config;
pub use error::{AppError, CatalogError, ConfigError, StoreError};
pub use favorites::{
    EpisodeKey, FavoriteEntry, FavoritesBackend, FavoritesOrder, FavoritesStore, JsonFileBackend,
    MemoryBackend, Toggled,
};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, Resource, SharedProgressReporter};
pub use route::Route;
pub use state::{FetchState, ViewScope};
