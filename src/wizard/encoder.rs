//! Line state encoding

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Board, Cell, Line, Piece};

/// Decimal weight of each piece kind, in `Piece::all()` order.
///
/// Each kind owns one decimal digit; a line has three cells so no counter can
/// carry into its neighbour.
pub const KIND_WEIGHTS: [u32; 6] = [100_000, 10_000, 1_000, 100, 10, 1];

/// Integer encoding of how many of each piece kind occupy one line.
///
/// Read as six digits, blue fisherman/fish/fly then red fisherman/fish/fly.
/// The empty line is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(u32);

impl StateId {
    pub const EMPTY: StateId = StateId(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn from_counts(counts: [u8; 6]) -> Self {
        let raw = counts
            .iter()
            .zip(KIND_WEIGHTS)
            .map(|(&count, weight)| u32::from(count) * weight)
            .sum();
        Self(raw)
    }

    /// Per-kind piece counts, the inverse of `from_counts` for valid ids
    pub fn counts(self) -> [u8; 6] {
        let mut counts = [0u8; 6];
        for (slot, weight) in counts.iter_mut().zip(KIND_WEIGHTS) {
            *slot = ((self.0 / weight) % 10) as u8;
        }
        counts
    }

    pub fn piece_count(self) -> u8 {
        self.counts().iter().sum()
    }

    /// Whether this id describes something three cells can actually hold
    pub fn is_valid_occupancy(self) -> bool {
        self.0 < 1_000_000 && self.counts().iter().all(|&c| c <= 3) && self.piece_count() <= 3
    }
}

impl fmt::Display for StateId {
    /// Digit-group form such as `120 001`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.counts();
        write!(f, "{}{}{} {}{}{}", c[0], c[1], c[2], c[3], c[4], c[5])
    }
}

/// Source of line states: computed directly, or through a cache
pub trait LineStates {
    fn line_state(&mut self, line: &Line, board: &Board) -> StateId;
}

/// Pure encoder from line contents to `StateId`
#[derive(Debug, Clone, Copy, Default)]
pub struct StateEncoder;

impl StateEncoder {
    pub fn encode(line: &Line, board: &Board) -> StateId {
        let mut counts = [0u8; 6];
        for piece in line.cells.iter().filter_map(|&cell| board.get(cell)) {
            counts[piece.kind_index()] += 1;
        }
        StateId::from_counts(counts)
    }

    /// Encode the line as if `piece` stood on `target`; `board` is not touched.
    pub fn encode_after_move(line: &Line, board: &Board, target: Cell, piece: Piece) -> StateId {
        Self::encode(line, &board.with_piece(target, piece))
    }
}

impl LineStates for StateEncoder {
    fn line_state(&mut self, line: &Line, board: &Board) -> StateId {
        Self::encode(line, board)
    }
}
