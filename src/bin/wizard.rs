//! Wizard CLI - inspect the Piscari move-evaluation engine
//!
//! This CLI stands in for the game host:
//! - Ranking every legal cell for a roll, with per-line gains
//! - Picking a move through the guarded engine
//! - Inspecting line value tables

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wizard")]
#[command(version, about = "Move evaluation for the Piscari wizard opponent", long_about = None)]
struct Cli {
    /// Log engine internals (debug level) unless RUST_LOG is set
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every legal cell for a roll
    Analyze(piscari::cli::commands::analyze::AnalyzeArgs),

    /// Pick the wizard's move for a roll
    Pick(piscari::cli::commands::pick::PickArgs),

    /// Show statistics of a line value table
    Table(piscari::cli::commands::table::TableArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze(args) => piscari::cli::commands::analyze::execute(args),
        Commands::Pick(args) => piscari::cli::commands::pick::execute(args),
        Commands::Table(args) => piscari::cli::commands::table::execute(args),
    }
}
