//! Shared arguments for CLI commands

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    adapters::JsonFileTable,
    app::{App, EngineConfig},
    game::{Board, Color, Icon},
    wizard::Engine,
};

/// How to build the engine
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Value table JSON file (defaults to the table shipped with the crate)
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Engine configuration JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed for tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluation budget in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Disable the evaluation cache
    #[arg(long)]
    pub no_cache: bool,
}

impl EngineArgs {
    /// Configuration file first, then command-line overrides
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        if self.no_cache {
            config = config.without_cache();
        }
        Ok(config)
    }

    /// Build an engine without loading its table
    pub fn build_engine(&self) -> Result<Engine> {
        let app = match &self.table {
            Some(path) => App::for_testing()
                .with_table_source(JsonFileTable::new(path))
                .build(),
            None => App::new(),
        };
        Ok(app.create_engine(self.engine_config()?)?)
    }
}

/// The position and roll to evaluate
#[derive(Args, Debug, Clone)]
pub struct PositionArgs {
    /// Board as nine tokens a1 a2 a3 b1 b2 b3 c1 c2 c3, "." for empty (e.g. "Mb . . . Fr . . . .")
    #[arg(long, short = 'b', default_value = ". . . . . . . . .")]
    pub board: String,

    /// Rolled icon (fisherman, fish, fly)
    #[arg(long, short = 'i')]
    pub icon: Icon,

    /// Color to play (blue, red)
    #[arg(long, short = 'c', default_value = "blue")]
    pub color: Color,
}

impl PositionArgs {
    pub fn board(&self) -> Result<Board> {
        Board::from_notation(&self.board).context("Failed to parse board")
    }
}
