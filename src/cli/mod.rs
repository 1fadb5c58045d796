//! CLI infrastructure for the wizard
//!
//! The commands act as a stand-in host: they build a board, ask the engine
//! for a move or a full ranking, and print the result.

pub mod commands;
pub mod config;
pub mod output;
