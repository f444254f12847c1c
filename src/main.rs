use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;
use url::Url;

use podshelf::view;
use podshelf::{
    App, CatalogClient, Config, EpisodeKey, FavoritesOrder, FavoritesStore, FetchState,
    JsonFileBackend, NoopReporter, ProgressEvent, ProgressReporter, ReqwestClient, Route,
    SharedProgressReporter, SortSelector, Toggled, ViewScope,
};

// Emoji with fallback for terminals without Unicode support
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static HEART: Emoji<'_, '_> = Emoji("❤️  ", "[*] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "x ");

/// Exit status used when a command is interrupted with Ctrl-C
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Browse a podcast catalog and keep a list of favorite episodes
#[derive(Parser, Debug)]
#[command(name = "podshelf")]
#[command(about = "Browse a podcast catalog and keep a list of favorite episodes")]
#[command(version)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the podcast API
    #[arg(long, global = true)]
    api_url: Option<Url>,

    /// File the favorites are stored in
    #[arg(long, global = true)]
    favorites_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode - suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the home screen
    Home,

    /// List the catalog, sorted or filtered by genre
    List {
        /// Sort or filter selector (see `genres`)
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// List the available sort and genre selectors
    Genres,

    /// Show a podcast and its seasons
    Show { id: String },

    /// Show the episodes of one season
    Season { id: String, season: u32 },

    /// List favorite episodes
    Favorites {
        /// newest, oldest, az or za
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// Add an episode to favorites, or remove it if already there
    Toggle {
        id: String,
        season: u32,
        episode: u32,
    },

    /// Remove an episode from favorites
    Remove {
        id: String,
        season: u32,
        episode: u32,
    },

    /// Render the view a route path maps to, e.g. /podcasts/10716/season/1
    Open { path: String },
}

/// Progress reporter using indicatif spinners for terminal output
struct IndicatifReporter {
    multi: MultiProgress,
    spinners: Mutex<HashMap<String, ProgressBar>>,
}

impl IndicatifReporter {
    fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            spinners: Mutex::new(HashMap::new()),
        }
    }

    fn start_spinner(&self, key: String, message: String) {
        let style = ProgressStyle::with_template("{spinner:.green} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));

        self.lock().insert(key, spinner);
    }

    fn take_spinner(&self, key: &str) -> Option<ProgressBar> {
        self.lock().remove(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, ProgressBar>> {
        self.spinners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProgressReporter for IndicatifReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchStarted { resource } => {
                let message = format!("{SEARCH}Loading {}...", resource.to_string().cyan());
                self.start_spinner(resource.to_string(), message);
            }

            ProgressEvent::FetchCompleted { resource } | ProgressEvent::FetchCancelled { resource } => {
                if let Some(spinner) = self.take_spinner(&resource.to_string()) {
                    spinner.finish_and_clear();
                }
            }

            ProgressEvent::FetchFailed { resource, error } => {
                if let Some(spinner) = self.take_spinner(&resource.to_string()) {
                    spinner.abandon_with_message(format!(
                        "{FAILURE}{} - {}",
                        truncate_title(&resource.to_string(), 40).red(),
                        error.red()
                    ));
                }
            }
        }
    }
}

fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        title.to_string()
    } else {
        let cut: String = title.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "podshelf=warn",
        1 => "podshelf=info",
        _ => "podshelf=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Display preferences resolved from flags and config
struct Preferences {
    sort: SortSelector,
    order: FavoritesOrder,
}

/// A rendered view and whether the data it needed could be loaded
struct Rendered {
    text: String,
    loaded: bool,
}

impl Rendered {
    fn ok(text: String) -> Self {
        Self { text, loaded: true }
    }

    fn from_state<T>(state: &FetchState<T>, render: impl FnOnce(&T) -> String) -> Self {
        match (state.ready(), view::render_pending(state)) {
            (Some(data), _) => Self::ok(render(data)),
            (None, pending) => Self {
                text: pending.unwrap_or_default(),
                loaded: false,
            },
        }
    }
}

type CliApp = App<ReqwestClient, JsonFileBackend>;

async fn show_route(app: &mut CliApp, route: Route, prefs: &Preferences, scope: &ViewScope) -> Rendered {
    match route {
        Route::Home => Rendered::ok(view::render_home()),

        Route::Podcasts => {
            app.load_catalog(scope).await;
            let sorted = app.sorted_catalog(&prefs.sort);
            Rendered::from_state(&sorted, |podcasts| view::render_catalog(podcasts, &prefs.sort))
        }

        Route::Podcast { id } => {
            let state = app.open_podcast(&id, scope).await;
            Rendered::from_state(state, view::render_podcast)
        }

        Route::Season { id, season_number } => {
            let state = app.open_podcast(&id, scope).await.clone();
            let favorites = app.favorites();
            Rendered::from_state(&state, |detail| {
                view::render_season(detail, season_number, |episode| {
                    favorites.is_favorite(&EpisodeKey::new(&detail.id, season_number, episode))
                })
            })
        }

        Route::Favorites => {
            let entries = app.favorites().list(prefs.order);
            Rendered::ok(view::render_favorites(&entries, prefs.order))
        }

        Route::NotFound { path } => Rendered::ok(view::render_not_found(&path)),
    }
}

async fn execute(app: &mut CliApp, command: Command, prefs: Preferences, scope: &ViewScope) -> Result<Rendered> {
    let mut prefs = prefs;

    let route = match command {
        Command::Home => Route::Home,
        Command::List { sort } => {
            if let Some(sort) = sort {
                prefs.sort = SortSelector::parse(&sort);
            }
            Route::Podcasts
        }
        Command::Genres => return Ok(Rendered::ok(view::render_selectors())),
        Command::Show { id } => Route::Podcast { id },
        Command::Season { id, season } => Route::Season {
            id,
            season_number: season,
        },
        Command::Favorites { sort } => {
            if let Some(sort) = sort {
                prefs.order = sort.parse()?;
            }
            Route::Favorites
        }
        Command::Toggle { id, season, episode } => {
            let key = EpisodeKey::new(id, season, episode);
            let toggled = app
                .toggle_favorite(&key, scope)
                .await
                .with_context(|| format!("Failed to toggle favorite {key}"))?;

            let text = match toggled {
                Toggled::Added => format!("{HEART}{} {}", "Added to favorites:".green().bold(), key),
                Toggled::Removed => format!("{CROSS}{} {}", "Removed from favorites:".yellow().bold(), key),
            };
            return Ok(Rendered::ok(text));
        }
        Command::Remove { id, season, episode } => {
            let key = EpisodeKey::new(id, season, episode);
            let removed = app
                .favorites_mut()
                .remove(&key)
                .with_context(|| format!("Failed to remove favorite {key}"))?;

            let text = if removed > 0 {
                format!("{SUCCESS}{} {}", "Removed from favorites:".green().bold(), key)
            } else {
                format!("{} {}", "Not a favorite:".dimmed(), key)
            };
            return Ok(Rendered::ok(text));
        }
        Command::Open { path } => Route::parse(&path),
    };

    Ok(show_route(app, route, &prefs, scope).await)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }
    if let Some(path) = args.favorites_file {
        config.favorites.path = Some(path);
    }

    let prefs = Preferences {
        sort: config.default_sort(),
        order: config
            .default_favorites_order()
            .context("Invalid default favorites order in configuration")?,
    };

    let client = ReqwestClient::with_timeout(config.timeout(), &config.api.user_agent)
        .context("Failed to build HTTP client")?;
    let catalog = CatalogClient::new(client, config.api.base_url.clone())
        .context("Invalid API base URL")?;

    let favorites_path = config.favorites_path();
    tracing::info!(path = %favorites_path.display(), "using favorites file");
    let favorites = FavoritesStore::open(JsonFileBackend::new(favorites_path));

    let reporter: SharedProgressReporter = if args.quiet {
        NoopReporter::shared()
    } else {
        Arc::new(IndicatifReporter::new())
    };

    let mut app = App::new(catalog, favorites, reporter);
    let scope = ViewScope::new();

    let rendered = tokio::select! {
        rendered = execute(&mut app, args.command, prefs, &scope) => rendered?,
        _ = tokio::signal::ctrl_c() => {
            scope.teardown();
            tracing::info!("interrupted, pending fetches discarded");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    };
    scope.teardown();

    println!("{}", rendered.text);

    if !rendered.loaded {
        std::process::exit(1);
    }

    Ok(())
}
