//! Strictly Trivia - Unified CLI
//!
//! Acquires trivia boards from a content provider and plays them in the terminal.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use std::sync::Arc;
use strictly_trivia::{
    BoardAcquisition, ContentProvider, FixtureProvider, GameController, JServiceProvider,
    TriviaConfig,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play => {
            tui::initialize_file_tracing()?;
            let controller = build_controller(&cli.config, cli.fixture.as_deref(), cli.seed)?;
            tui::run_tui(controller).await
        }
        Command::Board { json } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("info,strictly_trivia=debug")),
                )
                .with_writer(std::io::stderr)
                .init();
            let controller = build_controller(&cli.config, cli.fixture.as_deref(), cli.seed)?;
            print_board(&controller, json).await
        }
    }
}

/// Builds a controller over the fixture or HTTP provider.
#[instrument(skip_all, fields(config = %config_path.display(), fixture = ?fixture))]
fn build_controller(
    config_path: &Path,
    fixture: Option<&Path>,
    seed: Option<u64>,
) -> Result<GameController<dyn ContentProvider>> {
    let config = TriviaConfig::load(config_path)
        .context("Failed to load configuration")?
        .with_seed(seed);

    let provider: Arc<dyn ContentProvider> = match fixture {
        Some(path) => {
            info!(path = %path.display(), "Using fixture provider");
            let provider = FixtureProvider::from_file(path)
                .context("Failed to load fixture")?;
            Arc::new(provider)
        }
        None => {
            info!(base_url = %config.base_url(), "Using HTTP provider");
            let provider = JServiceProvider::new(config.base_url(), config.request_timeout())
                .context("Failed to create HTTP provider")?
                .with_max_offset(*config.max_offset());
            Arc::new(provider)
        }
    };

    let mut acquisition = BoardAcquisition::new(provider, config.policy());
    if let Some(seed) = config.seed() {
        acquisition = acquisition.with_seed(*seed);
    }

    Ok(GameController::new(acquisition))
}

/// Acquires one board and writes it to stdout.
#[instrument(skip(controller))]
async fn print_board(controller: &GameController<dyn ContentProvider>, json: bool) -> Result<()> {
    controller
        .on_restart_requested()
        .await
        .context("Failed to acquire a board")?;

    let (generation, board) = controller
        .snapshot()
        .context("Acquisition finished without a board")?;
    info!(%generation, "Printing board");

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        print!("{}", board.display());
    }

    Ok(())
}
