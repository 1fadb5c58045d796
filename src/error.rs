//! Error types for the Piscari wizard engine

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::Icon;

/// Main error type for the Piscari crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("line value table is not loaded")]
    ValueTableNotLoaded,

    #[error("invalid board at {cell}: {reason}")]
    InvalidBoard { cell: String, reason: String },

    #[error("no valid moves available for {icon}")]
    NoValidMoves { icon: Icon },

    #[error("evaluation timed out after {elapsed_ms}ms (budget {budget_ms}ms)")]
    ComputationTimeout { elapsed_ms: u128, budget_ms: u128 },

    #[error("unexpected engine failure: {message}")]
    Unexpected { message: String },

    #[error("invalid cell name '{name}' (expected a1..c3)")]
    InvalidCellName { name: String },

    #[error("invalid icon '{value}' (expected fisherman, fish or fly)")]
    InvalidIcon { value: String },

    #[error("invalid color '{value}' (expected blue or red)")]
    InvalidColor { value: String },

    #[error("invalid board notation '{notation}': {reason}")]
    InvalidNotation { notation: String, reason: String },

    #[error("invalid state id '{raw}': {reason}")]
    InvalidStateId { raw: String, reason: String },

    #[error("state {state} appears twice with different values")]
    DuplicateState { state: u32 },

    #[error("line value table from {source_name} has no entries")]
    EmptyTable { source_name: String },

    #[error("failed to read line value table from {source_name}: {message}")]
    TableSource {
        source_name: String,
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    pub(crate) fn invalid_board(cell: impl fmt::Display, reason: impl Into<String>) -> Self {
        Error::InvalidBoard {
            cell: cell.to_string(),
            reason: reason.into(),
        }
    }

    /// Classify this error for the failure guard.
    ///
    /// Anything outside the four engine conditions counts as `Unexpected`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ValueTableNotLoaded => ErrorKind::ValueTableNotLoaded,
            Error::InvalidBoard { .. } => ErrorKind::InvalidBoard,
            Error::NoValidMoves { .. } => ErrorKind::NoValidMoves,
            Error::ComputationTimeout { .. } => ErrorKind::ComputationTimeout,
            _ => ErrorKind::Unexpected,
        }
    }
}

/// Classification of a wizard evaluation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ValueTableNotLoaded,
    InvalidBoard,
    NoValidMoves,
    ComputationTimeout,
    Unexpected,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::ValueTableNotLoaded,
        ErrorKind::InvalidBoard,
        ErrorKind::NoValidMoves,
        ErrorKind::ComputationTimeout,
        ErrorKind::Unexpected,
    ];

    /// `NoValidMoves` is a terminal game condition, not a malfunction.
    pub fn is_malfunction(self) -> bool {
        !matches!(self, ErrorKind::NoValidMoves)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ValueTableNotLoaded => "state-table-not-loaded",
            ErrorKind::InvalidBoard => "invalid-board",
            ErrorKind::NoValidMoves => "no-valid-moves",
            ErrorKind::ComputationTimeout => "timeout",
            ErrorKind::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
