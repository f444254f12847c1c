use std::fmt;
use std::sync::Arc;

/// Something a view is waiting on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// The full podcast catalog
    Catalog,
    /// One podcast with its seasons
    Podcast { id: String },
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Catalog => f.write_str("podcast catalog"),
            Resource::Podcast { id } => write!(f, "podcast {id}"),
        }
    }
}

/// Events emitted while views load data, used to drive loading indicators
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A fetch was issued
    FetchStarted { resource: Resource },

    /// A fetch finished successfully
    FetchCompleted { resource: Resource },

    /// A fetch failed
    FetchFailed { resource: Resource, error: String },

    /// A fetch was abandoned because its view went away
    FetchCancelled { resource: Resource },
}

/// Trait for reporting loading progress.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {}
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
