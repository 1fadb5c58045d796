//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::piece::Piece;
use crate::Error;

/// One of the nine squares, named by column letter and row digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    A1,
    A2,
    A3,
    B1,
    B2,
    B3,
    C1,
    C2,
    C3,
}

/// Geometric class of a cell, which fixes how many lines run through it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Center,
    Corner,
    Side,
}

impl Cell {
    pub const ALL: [Cell; 9] = [
        Cell::A1,
        Cell::A2,
        Cell::A3,
        Cell::B1,
        Cell::B2,
        Cell::B3,
        Cell::C1,
        Cell::C2,
        Cell::C3,
    ];

    /// Center first, then corners, then sides
    pub const PRIORITY: [Cell; 9] = [
        Cell::B2,
        Cell::A1,
        Cell::A3,
        Cell::C1,
        Cell::C3,
        Cell::A2,
        Cell::B1,
        Cell::B3,
        Cell::C2,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Cell> {
        Cell::ALL.get(index).copied()
    }

    /// Column 0..3 (a, b, c)
    pub fn column(self) -> usize {
        self.index() / 3
    }

    /// Row 0..3 (1, 2, 3)
    pub fn row(self) -> usize {
        self.index() % 3
    }

    pub fn kind(self) -> CellKind {
        match (self.column(), self.row()) {
            (1, 1) => CellKind::Center,
            (1, _) | (_, 1) => CellKind::Side,
            _ => CellKind::Corner,
        }
    }

    pub fn name(self) -> &'static str {
        const NAMES: [&str; 9] = ["a1", "a2", "a3", "b1", "b2", "b3", "c1", "c2", "c3"];
        NAMES[self.index()]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Cell::ALL
            .into_iter()
            .find(|cell| cell.name() == name)
            .ok_or_else(|| Error::InvalidCellName {
                name: s.to_string(),
            })
    }
}

/// A well-formed Piscari board: every cell is either empty or holds one piece.
///
/// This type implements `Copy` since hypothetical moves are evaluated on
/// private copies and it is only nine small options wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Piece>; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: Cell) -> Option<Piece> {
        self.cells[cell.index()]
    }

    pub fn set(&mut self, cell: Cell, content: Option<Piece>) {
        self.cells[cell.index()] = content;
    }

    /// Copy of this board with `piece` written over `cell`
    pub fn with_piece(&self, cell: Cell, piece: Piece) -> Board {
        let mut copy = *self;
        copy.cells[cell.index()] = Some(piece);
        copy
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Occupied cells in cell order
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        Cell::ALL
            .into_iter()
            .filter_map(|cell| self.get(cell).map(|piece| (cell, piece)))
    }

    /// Canonical serialization of the occupied cells only, e.g. `b2:Mb|c3:Fr`.
    pub fn fingerprint(&self) -> String {
        self.occupied()
            .map(|(cell, piece)| format!("{cell}:{}", piece.code()))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Parse the nine-token notation used by the CLI and tests.
    ///
    /// Tokens are given in cell order `a1 a2 a3 b1 b2 b3 c1 c2 c3`; `.` marks an
    /// empty cell and any other token is a piece code such as `Fb`.
    ///
    /// # Examples
    ///
    /// ```
    /// use piscari::game::{Board, Cell, Color, Icon, Piece};
    ///
    /// let board = Board::from_notation(". . . . Mb . . . Yr")?;
    /// assert_eq!(board.get(Cell::B2), Some(Piece::new(Icon::Fisherman, Color::Blue)));
    /// assert_eq!(board.get(Cell::C3), Some(Piece::new(Icon::Fly, Color::Red)));
    /// # Ok::<(), piscari::Error>(())
    /// ```
    pub fn from_notation(notation: &str) -> Result<Board, Error> {
        let tokens: Vec<&str> = notation.split_whitespace().collect();
        if tokens.len() != 9 {
            return Err(Error::InvalidNotation {
                notation: notation.to_string(),
                reason: format!("expected 9 cells, got {}", tokens.len()),
            });
        }

        let mut board = Board::new();
        for (cell, token) in Cell::ALL.into_iter().zip(tokens) {
            if token == "." {
                continue;
            }
            let piece = Piece::from_code(token).ok_or_else(|| Error::InvalidNotation {
                notation: notation.to_string(),
                reason: format!("unknown piece '{token}' at {cell}"),
            })?;
            board.set(cell, Some(piece));
        }
        Ok(board)
    }

    pub fn to_notation(&self) -> String {
        self.cells
            .iter()
            .map(|content| content.map_or_else(|| ".".to_string(), Piece::code))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..3).rev() {
            write!(f, "{} ", row + 1)?;
            for column in 0..3 {
                let cell = Cell::ALL[column * 3 + row];
                match self.get(cell) {
                    Some(piece) => write!(f, " {}", piece.code())?,
                    None => write!(f, " ..")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "    a  b  c")
    }
}
