//! Quote API: a random quote over HTTP.
//!
//! This is the application entry point. It loads configuration, builds the quote
//! catalog (refusing to start without one), initializes tracing, sets up the Axum
//! router and serves until SIGINT/SIGTERM.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quote_api::catalog::Seeding;
use quote_api::config::{AppConfig, LoggingConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use quote_api::{create_router, http, AppState, Error};

/// Quote API: answers every request with a random quote as JSON
#[derive(Parser, Debug)]
#[command(name = "quote-api", version, about)]
struct Args {
    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "quote_api=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Listen address, overrides http.host
    #[arg(long, env = "QUOTE_API_HOST")]
    host: Option<String>,

    /// Listen port, overrides http.port
    #[arg(short, long, env = "QUOTE_API_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Quote API failed");
            eprintln!("quote-api: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let mut config = AppConfig::load(&args.config)?;
    config.apply_overrides(args.host, args.port)?;

    init_tracing(args.log_level, &config.logging)?;

    match &config.source {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
        None => tracing::info!(
            path = %args.config,
            "Configuration file not found, using defaults"
        ),
    }

    // Build the catalog before binding so a bad catalog never serves a request
    let state = AppState::from_config(config)?;
    match state.catalog.seeding() {
        Seeding::Entropy => tracing::info!(quotes = state.catalog.len(), "Quote catalog ready"),
        Seeding::Fixed(seed) => tracing::info!(
            quotes = state.catalog.len(),
            seed,
            "Quote catalog ready with fixed seed"
        ),
    }

    let config = state.config.clone();
    let app = create_router(state);

    http::start_server(app, &config).await?;

    Ok(())
}

/// Initialize tracing with filter priority: CLI > env > default
fn init_tracing(cli_filter: Option<String>, logging: &LoggingConfig) -> Result<(), Error> {
    let log_filter = cli_filter
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let json = logging.is_json();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
