//! Common test utilities for the piscari test suite.
//!
//! Engine construction against the shipped table, and seeded random boards
//! for property checks.

#![allow(dead_code)]

use piscari::{
    adapters::EmbeddedTable,
    app::{App, EngineConfig},
    game::{Board, Cell, Piece},
    ports::TableSource,
    wizard::{Engine, StateValueTable},
};
use rand::{Rng, rngs::StdRng};

/// Engine loaded with the shipped table and a fixed seed
pub fn ready_engine(seed: u64) -> Engine {
    App::new()
        .create_ready_engine(EngineConfig::new().with_seed(seed))
        .unwrap()
}

/// Same as `ready_engine` with memoization switched off
pub fn uncached_engine(seed: u64) -> Engine {
    App::new()
        .create_ready_engine(EngineConfig::new().with_seed(seed).without_cache())
        .unwrap()
}

pub fn shipped_table() -> StateValueTable {
    StateValueTable::from_records(&EmbeddedTable.fetch().unwrap()).unwrap()
}

/// A board where each cell is empty with probability `empty_ratio`,
/// otherwise holds a uniformly drawn piece.
///
/// Piscari boards carry no parity constraint, so every such board is
/// reachable by some sequence of rolls and captures.
pub fn random_board(rng: &mut StdRng, empty_ratio: f64) -> Board {
    let pieces: Vec<Piece> = Piece::all().collect();
    let mut board = Board::new();
    for cell in Cell::ALL {
        if rng.random_bool(empty_ratio) {
            continue;
        }
        let piece = pieces[rng.random_range(0..pieces.len())];
        board.set(cell, Some(piece));
    }
    board
}
