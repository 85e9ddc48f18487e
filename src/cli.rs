//! Command-line interface for strictly_trivia.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Trivia - six categories, five clues, one board
#[derive(Parser, Debug)]
#[command(name = "strictly_trivia")]
#[command(about = "Trivia board backed by a jService provider", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "trivia_config.toml")]
    pub config: PathBuf,

    /// Serve categories from a JSON fixture instead of the HTTP provider
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    /// Seed for deterministic sampling (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the board in the terminal
    Play,

    /// Acquire one board and print it
    Board {
        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },
}
