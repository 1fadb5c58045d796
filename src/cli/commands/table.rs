//! Table command - Inspect a line value table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::{EmbeddedTable, JsonFileTable},
    cli::output::{print_kv, print_section, print_subsection},
    game::Color,
    ports::TableSource,
    wizard::StateValueTable,
};

#[derive(Parser, Debug)]
#[command(about = "Show statistics of a line value table")]
pub struct TableArgs {
    /// Value table JSON file (defaults to the table shipped with the crate)
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// List every state with its values
    #[arg(long)]
    pub list: bool,
}

pub fn execute(args: TableArgs) -> Result<()> {
    let source: Box<dyn TableSource> = match &args.table {
        Some(path) => Box::new(JsonFileTable::new(path)),
        None => Box::new(EmbeddedTable),
    };

    let mut table = StateValueTable::new();
    table
        .load(&*source)
        .with_context(|| format!("Failed to load {}", source.name()))?;

    print_section(&format!("Line value table: {}", source.name()));
    print_kv("states", &table.len().to_string());

    for color in Color::ALL {
        let values: Vec<i32> = table
            .states()
            .into_iter()
            .map(|state| table.value_for(state, color))
            .collect();
        let best = values.iter().copied().max().unwrap_or_default();
        let worst = values.iter().copied().min().unwrap_or_default();
        print_kv(
            &format!("{color} range"),
            &format!("{worst} .. {best}"),
        );
    }

    if args.list {
        print_subsection("States (bbb rrr: blue, red)");
        for state in table.states() {
            if let Some(value) = table.get(state) {
                println!("  {state}  {:>7} {:>7}", value.blue, value.red);
            }
        }
    }

    Ok(())
}
