//! Winning line catalog for the Piscari board

use std::fmt;

use serde::Serialize;

use super::board::Cell;

/// Identifier of one of the eight winning lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineId {
    ColumnA,
    ColumnB,
    ColumnC,
    Row1,
    Row2,
    Row3,
    /// a1-b2-c3
    Diagonal,
    /// a3-b2-c1
    AntiDiagonal,
}

impl LineId {
    /// Short display name: `a b c` for columns, `1 2 3` for rows, `/` and `\`
    pub fn name(self) -> &'static str {
        match self {
            LineId::ColumnA => "a",
            LineId::ColumnB => "b",
            LineId::ColumnC => "c",
            LineId::Row1 => "1",
            LineId::Row2 => "2",
            LineId::Row3 => "3",
            LineId::Diagonal => "/",
            LineId::AntiDiagonal => "\\",
        }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered triple of cells that wins when filled with one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub id: LineId,
    pub cells: [Cell; 3],
}

impl Line {
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id.name())
    }
}

/// The 3 columns, 3 rows and 2 diagonals
pub const LINES: [Line; 8] = [
    Line {
        id: LineId::ColumnA,
        cells: [Cell::A1, Cell::A2, Cell::A3],
    },
    Line {
        id: LineId::ColumnB,
        cells: [Cell::B1, Cell::B2, Cell::B3],
    },
    Line {
        id: LineId::ColumnC,
        cells: [Cell::C1, Cell::C2, Cell::C3],
    },
    Line {
        id: LineId::Row1,
        cells: [Cell::A1, Cell::B1, Cell::C1],
    },
    Line {
        id: LineId::Row2,
        cells: [Cell::A2, Cell::B2, Cell::C2],
    },
    Line {
        id: LineId::Row3,
        cells: [Cell::A3, Cell::B3, Cell::C3],
    },
    Line {
        id: LineId::Diagonal,
        cells: [Cell::A1, Cell::B2, Cell::C3],
    },
    Line {
        id: LineId::AntiDiagonal,
        cells: [Cell::A3, Cell::B2, Cell::C1],
    },
];

/// Reverse index into `LINES`, by `Cell::index()`
const CELL_TO_LINES: [&[usize]; 9] = [
    &[0, 3, 6],    // a1
    &[0, 4],       // a2
    &[0, 5, 7],    // a3
    &[1, 3],       // b1
    &[1, 4, 6, 7], // b2
    &[1, 5],       // b3
    &[2, 3, 7],    // c1
    &[2, 4],       // c2
    &[2, 5, 6],    // c3
];

/// Lines running through `cell`: 4 for the center, 3 for corners, 2 for sides
pub fn lines_through(cell: Cell) -> impl Iterator<Item = &'static Line> {
    CELL_TO_LINES[cell.index()].iter().map(|&idx| &LINES[idx])
}

/// The line containing both cells, if they are distinct and aligned
pub fn common_line(a: Cell, b: Cell) -> Option<&'static Line> {
    if a == b {
        return None;
    }
    lines_through(a).find(|line| line.contains(b))
}

/// The cell completing the line through `a` and `b`
pub fn third_cell(a: Cell, b: Cell) -> Option<Cell> {
    common_line(a, b)?
        .cells
        .into_iter()
        .find(|&cell| cell != a && cell != b)
}
