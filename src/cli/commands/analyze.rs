//! Analyze command - Rank every legal cell with its per-line breakdown

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::{EngineArgs, PositionArgs},
        output::{format_gain, print_board, print_kv, print_section, print_subsection},
    },
    game::Piece,
    wizard::evaluator::legal_moves,
};

#[derive(Parser, Debug)]
#[command(about = "Rank every legal cell for a roll")]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let board = args.position.board()?;
    let (icon, color) = (args.position.icon, args.position.color);

    let mut engine = args.engine.build_engine()?;
    engine
        .initialize()
        .context("Failed to load the line value table")?;
    let analysis = engine.analyze(&board, icon, color)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    print_section(&format!("Wizard analysis: {}", Piece::new(icon, color)));
    print_board(&board);

    let moves = legal_moves(&board, icon);
    if moves.is_empty() {
        println!("\nNo legal cell for {icon}.");
        return Ok(());
    }

    print_subsection("Ranking");
    for evaluation in &analysis.evaluations {
        let capture = moves
            .iter()
            .find(|m| m.cell == evaluation.cell)
            .and_then(|m| m.captured)
            .map(|piece| format!(" (captures {piece})"))
            .unwrap_or_default();
        println!(
            "  {} {:>7}{capture}",
            evaluation.cell,
            format_gain(evaluation.total_gain)
        );
        for line_gain in &evaluation.line_gains {
            println!(
                "      line {:<2} {} -> {}  {:>6} -> {:<6} {}",
                line_gain.line.name(),
                line_gain.before,
                line_gain.after,
                line_gain.value_before,
                line_gain.value_after,
                format_gain(line_gain.gain)
            );
        }
    }

    print_subsection("Choice");
    if let Some(best) = analysis.best_cell {
        print_kv("best cell", &best.to_string());
    }
    print_kv("max gain", &format_gain(analysis.max_gain));
    print_kv("tied cells", &analysis.tie_count.to_string());

    let stats = engine.strategy_stats(&board, icon, color)?;
    print_subsection("Gain distribution");
    print_kv("positive", &stats.positive.to_string());
    print_kv("neutral", &stats.neutral.to_string());
    print_kv("negative", &stats.negative.to_string());
    print_kv("mean", &format!("{:.2}", stats.mean_gain));

    Ok(())
}
