mod backend;
mod entry;
mod store;

pub use backend::{FAVORITES_KEY, FavoritesBackend, JsonFileBackend, MemoryBackend};
pub use entry::{EpisodeKey, FavoriteEntry, FavoritesOrder, ParseOrderError};
pub use store::{FavoritesStore, Toggled};
