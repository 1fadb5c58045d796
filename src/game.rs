//! Piscari board model: icons, colors, cells, lines

pub mod board;
pub mod lines;
pub mod piece;
pub mod snapshot;

pub use board::{Board, Cell, CellKind};
pub use lines::{LINES, Line, LineId, common_line, lines_through, third_cell};
pub use piece::{Color, Icon, Piece};
pub use snapshot::{BoardSnapshot, CellSnapshot, CellView, IconGrid};
