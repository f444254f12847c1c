mod fetch;
mod genre;
mod model;
mod sort;

pub use fetch::{CatalogClient, DEFAULT_API_URL};
pub use genre::{Genre, genre_label};
pub use model::{Episode, PodcastDetail, PodcastPreview, Season};
pub use sort::{SortSelector, compare_titles, sort_podcasts};
