//! cinema - browse and search movies from the OMDb API.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, OmdbConfig, resolve_config_path, resolve_log_path};
use cinema_api::catalog::{
    Genre, Shelves, load_categories_with, search_by_query, shelves_from_categories,
    shelves_from_search,
};
use cinema_api::omdb::OmdbClient;

/// Environment variable holding the OMDb API key.
const API_KEY_ENV: &str = "OMDB_API_KEY";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print movies for each genre shelf.
    Categories(CategoriesArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Browse genre shelves and search interactively via TUI.
    Browse,
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `categories` subcommand.
#[derive(clap::Args)]
struct CategoriesArgs {
    /// Comma-separated genres (e.g. "action,sci-fi"). Falls back to config if omitted.
    #[arg(long, value_delimiter = ',')]
    genres: Option<Vec<Genre>>,

    /// Maximum genre requests in flight (1 = sequential). Falls back to config if omitted.
    #[arg(long)]
    concurrency: Option<usize>,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Title text to search for.
    #[arg(long)]
    query: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path.
    Path,
}

/// Builds an `OmdbClient` from `OMDB_API_KEY` (or `omdb.api_key`) and config.
///
/// # Errors
///
/// Returns an error if no API key is available, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(config: &OmdbConfig) -> Result<OmdbClient> {
    let api_key = std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| config.api_key.clone())
        .unwrap_or_default();

    let mut builder = OmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = &config.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid omdb.base_url in config: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(retries) = config.max_retries {
        builder = builder.max_retries(retries);
    }

    builder
        .build()
        .with_context(|| format!("failed to build OMDb client (set {API_KEY_ENV})"))
}

/// Logs every shelf with its movies.
fn print_shelves(shelves: &Shelves) {
    for (key, movies) in shelves {
        tracing::info!("{}", key.title());
        if movies.is_empty() {
            tracing::info!("  No movies found");
        }
        for movie in movies {
            tracing::info!("  {}\t{}\t{}", movie.imdb_id, movie.year, movie.title);
        }
    }
}

/// Runs the `categories` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
#[instrument(skip_all)]
async fn run_categories(args: CategoriesArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = AppConfig::load(&resolve_config_path(dir)?)?;
    let client = build_omdb_client(&config.omdb)?;

    let genres = args.genres.unwrap_or(config.catalog.genres);
    let concurrency = args.concurrency.unwrap_or(config.catalog.concurrency);

    let categories = load_categories_with(&client, &genres, concurrency).await;
    print_shelves(&shelves_from_categories(categories));

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the search fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = AppConfig::load(&resolve_config_path(dir)?)?;
    let client = build_omdb_client(&config.omdb)?;

    let movies = search_by_query(&client, &args.query)
        .await
        .map_err(|err| anyhow::Error::new(err).context("Failed to search movies"))?;

    tracing::info!("Total results: {}", movies.len());
    print_shelves(&shelves_from_search(movies));

    Ok(())
}

/// Launches the browser TUI.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let config = AppConfig::load(&resolve_config_path(dir)?)?;
    let client = build_omdb_client(&config.omdb)?;

    tracing::info!(
        genres = config.catalog.genres.len(),
        concurrency = config.catalog.concurrency,
        "Launching TUI..."
    );
    crate::tui::run_browser(
        Arc::new(client),
        config.catalog.genres,
        config.catalog.concurrency,
    )
    .await
    .context("movie browser TUI failed")
}

/// Writes a default config file.
///
/// # Errors
///
/// Returns an error if the file exists (without `force`) or cannot be written.
fn run_config_init(force: bool, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Prints the config file path.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
fn run_config_path(dir: Option<&PathBuf>) -> Result<()> {
    tracing::info!("{}", resolve_config_path(dir)?.display());
    Ok(())
}

/// Chooses where logs go: a file while the TUI owns the terminal, stdout otherwise.
///
/// ANSI colors are used on stdout unless `NO_COLOR` is set.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn log_writer(cli: &Cli) -> Result<(BoxMakeWriter, bool)> {
    if !matches!(cli.command, Commands::Browse) {
        let ansi = std::env::var("NO_COLOR").map_or(true, |v| v.is_empty());
        return Ok((BoxMakeWriter::new(std::io::stdout), ansi));
    }

    let path = resolve_log_path(cli.dir.as_ref())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok((BoxMakeWriter::new(Mutex::new(file)), false))
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (writer, ansi) = log_writer(&cli)?;

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Categories(args) => run_categories(args, dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Browse => run_browse(dir).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init { force } => run_config_init(force, dir),
            ConfigSubcommands::Path => run_config_path(dir),
        },
    }
}
