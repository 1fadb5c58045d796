//! Pick command - Ask the guarded engine for a move, as a host would

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use crate::{
    cli::{
        config::{EngineArgs, PositionArgs},
        output::{print_cache_stats, print_error_stats, print_kv, print_section},
    },
    game::{Board, BoardSnapshot, Piece},
};

#[derive(Parser, Debug)]
#[command(about = "Pick the wizard's move for a roll")]
pub struct PickArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Number of times to ask (shows cache reuse and tie-break spread)
    #[arg(long, short = 'n', default_value_t = 1)]
    pub repeat: usize,

    /// Print engine statistics after picking
    #[arg(long)]
    pub stats: bool,
}

pub fn execute(args: PickArgs) -> Result<()> {
    let board: Board = args.position.board()?;
    let (icon, color) = (args.position.icon, args.position.color);

    let mut engine = args.engine.build_engine()?;
    // An unloaded table is not fatal here: the engine answers with its fallback
    if let Err(err) = engine.initialize() {
        warn!(error = %err, "continuing without the line value table");
    }

    let snapshot = BoardSnapshot::from(&board);
    let picks: Vec<String> = (0..args.repeat.max(1))
        .map(|_| {
            engine
                .select_best_move(&snapshot, icon, color)
                .map_or_else(|| "none".to_string(), |cell| cell.to_string())
        })
        .collect();

    if !args.stats {
        println!("{}", picks.join(" "));
        return Ok(());
    }

    print_section(&format!("Wizard pick: {}", Piece::new(icon, color)));
    print_kv("moves", &picks.join(" "));
    print_kv("table loaded", &engine.is_ready().to_string());
    print_cache_stats(engine.cache_stats());
    print_error_stats(engine.error_stats());

    Ok(())
}
