// ABOUTME: Entry point for the remedy binary.
// ABOUTME: Parses CLI arguments, initializes tracing, validates the data files, and starts the HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use remedy_server::{AppState, RemedyConfig, create_router};
use remedy_store::check_files;

#[derive(Parser, Debug)]
#[command(name = "remedy")]
#[command(about = "Priority-ordered treatment records for crop diseases")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load both data files and serve the HTTP API (default)
    Serve {
        /// Socket address to bind, overrides REMEDY_BIND
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Directory holding the data files, overrides REMEDY_DATA_DIR
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate the data files and print a summary without serving
    Check {
        /// Directory holding the data files, overrides REMEDY_DATA_DIR
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "remedy=info,remedy_server=info,remedy_store=info,tower_http=debug",
                )
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = RemedyConfig::from_env().context("invalid configuration")?;

    match cli.command.unwrap_or(Command::Serve {
        bind: None,
        data_dir: None,
    }) {
        Command::Serve { bind, data_dir } => {
            let config = config.with_overrides(bind, data_dir);
            config.validate().context("invalid configuration")?;
            serve(config).await
        }
        Command::Check { data_dir } => check(&config.with_overrides(None, data_dir)),
    }
}

fn check(config: &RemedyConfig) -> Result<()> {
    let report = check_files(&config.medicines_path(), &config.disease_info_path())
        .context("data files failed validation")?;
    println!("{report}");
    Ok(())
}

async fn serve(config: RemedyConfig) -> Result<()> {
    tracing::info!("remedy starting up");

    let state = AppState::from_config(&config).with_context(|| {
        format!(
            "failed to load data files {} and {}",
            config.medicines_path().display(),
            config.disease_info_path().display()
        )
    })?;

    if config.api_key.is_none() {
        tracing::warn!("REMEDY_API_KEY not set; mutating routes are unauthenticated");
    }

    let app = create_router(Arc::new(state), config.api_key.clone());
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!("listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("remedy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
