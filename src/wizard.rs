//! Wizard opponent: line-value move evaluation
//!
//! The wizard scores every legal cell by summing, over the lines through that
//! cell, how much a hypothetical piece changes the line's precomputed value:
//!
//! - `encoder` turns a line's occupants into a `StateId`
//! - `value_table` maps a `StateId` to a value for each color
//! - `line_eval` computes per-line gains and their sum for one cell
//! - `cache` memoizes line states and whole-move gains
//! - `evaluator` ranks legal cells and breaks ties at random
//! - `guard` validates input, enforces the time budget, and falls back
//! - `engine` ties the pieces together behind the host-facing API

pub mod cache;
pub mod encoder;
pub mod engine;
pub mod evaluator;
pub mod guard;
pub mod line_eval;
pub mod value_table;

pub use cache::{CacheStats, EvaluationCache};
pub use encoder::{LineStates, StateEncoder, StateId};
pub use engine::Engine;
pub use evaluator::{Analysis, LegalMove, MoveEvaluator, StrategyStats};
pub use guard::{Deadline, ErrorStats, FailureGuard};
pub use line_eval::{LineEvaluator, LineGain, MoveEvaluation};
pub use value_table::{LineValue, StateValueTable, TableRecord};
