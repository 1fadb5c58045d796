//! Piscari wizard: move evaluation for a food-chain tic-tac-toe
//!
//! Piscari is played on a 3×3 grid. Each turn a player rolls one of three
//! icons (fisherman, fish, fly) and places it on an empty cell, or on a cell
//! whose icon it beats: the fisherman catches the fish, the fish eats the fly,
//! and the fly stings the fisherman. Three identical pieces in a line win.
//!
//! This crate provides:
//! - The board model and the eight-line catalog (`game`)
//! - The wizard engine that advises the best cell for a roll (`wizard`)
//! - Value table sources behind a port (`ports`, `adapters`)
//! - A dependency injection container and engine configuration (`app`)
//! - A diagnostic command-line host (`cli`)

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod game;
pub mod ports;
pub mod wizard;

pub use app::{App, EngineConfig};
pub use error::{Error, ErrorKind, Result};
pub use game::{Board, BoardSnapshot, Cell, Color, Icon, Piece};
pub use wizard::{Analysis, Engine, StateId};
