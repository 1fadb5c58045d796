//! Host-facing board snapshots and their validation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Cell},
    piece::{Color, Icon, Piece},
};
use crate::{Error, Result};

/// Raw contents of one cell as the host game state stores it.
///
/// Both fields are loose strings so that a malformed host state can be
/// represented and rejected rather than failing at deserialization time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CellSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn piece(piece: Piece) -> Self {
        Self {
            icon: Some(piece.icon.to_string()),
            color: Some(piece.color.to_string()),
        }
    }
}

/// Board as handed over by the host: cell name to raw contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub cells: BTreeMap<String, CellSnapshot>,
}

impl BoardSnapshot {
    pub fn insert(&mut self, cell: Cell, content: CellSnapshot) {
        self.cells.insert(cell.name().to_string(), content);
    }

    pub fn remove(&mut self, cell: Cell) -> Option<CellSnapshot> {
        self.cells.remove(cell.name())
    }

    pub fn get(&self, cell: Cell) -> Option<&CellSnapshot> {
        self.cells.get(cell.name())
    }

    /// Validate into a typed board.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBoard` if any of the nine cells is missing, holds
    /// an icon without a color (or the reverse), or names an unknown icon or
    /// color.
    pub fn validate(&self) -> Result<Board> {
        let mut board = Board::new();
        for cell in Cell::ALL {
            let raw = self
                .get(cell)
                .ok_or_else(|| Error::invalid_board(cell, "cell is missing"))?;

            let content = match (&raw.icon, &raw.color) {
                (None, None) => None,
                (Some(_), None) => return Err(Error::invalid_board(cell, "icon without color")),
                (None, Some(_)) => return Err(Error::invalid_board(cell, "color without icon")),
                (Some(icon), Some(color)) => {
                    let icon = icon.parse::<Icon>().map_err(|_| {
                        Error::invalid_board(cell, format!("unknown icon '{icon}'"))
                    })?;
                    let color = color.parse::<Color>().map_err(|_| {
                        Error::invalid_board(cell, format!("unknown color '{color}'"))
                    })?;
                    Some(Piece::new(icon, color))
                }
            };
            board.set(cell, content);
        }
        Ok(board)
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        let mut snapshot = BoardSnapshot::default();
        for cell in Cell::ALL {
            let content = board.get(cell).map_or_else(CellSnapshot::empty, CellSnapshot::piece);
            snapshot.insert(cell, content);
        }
        snapshot
    }
}

impl TryFrom<&BoardSnapshot> for Board {
    type Error = Error;

    fn try_from(snapshot: &BoardSnapshot) -> Result<Self> {
        snapshot.validate()
    }
}

/// What the capture rule can see in one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Missing,
    Empty,
    Occupied(Icon),
    Unreadable,
}

/// Read-only icon view of a board, valid or not.
///
/// Legality only depends on icons, so the same rule serves the full engine
/// on a validated `Board` and the fallback on a raw `BoardSnapshot`.
pub trait IconGrid {
    fn view(&self, cell: Cell) -> CellView;

    /// A cell is legal if empty, or if `icon` captures its occupant's icon
    /// regardless of the occupant's color.
    fn is_legal(&self, cell: Cell, icon: Icon) -> bool {
        match self.view(cell) {
            CellView::Empty => true,
            CellView::Occupied(occupant) => icon.beats(occupant),
            CellView::Missing | CellView::Unreadable => false,
        }
    }

    /// Legal cells in cell order
    fn legal_cells(&self, icon: Icon) -> Vec<Cell> {
        Cell::ALL
            .into_iter()
            .filter(|&cell| self.is_legal(cell, icon))
            .collect()
    }
}

impl IconGrid for Board {
    fn view(&self, cell: Cell) -> CellView {
        match self.get(cell) {
            Some(piece) => CellView::Occupied(piece.icon),
            None => CellView::Empty,
        }
    }
}

impl IconGrid for BoardSnapshot {
    fn view(&self, cell: Cell) -> CellView {
        match self.get(cell) {
            None => CellView::Missing,
            Some(CellSnapshot { icon: None, .. }) => CellView::Empty,
            Some(CellSnapshot {
                icon: Some(icon), ..
            }) => icon
                .parse::<Icon>()
                .map_or(CellView::Unreadable, CellView::Occupied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_snapshot() -> BoardSnapshot {
        let board = Board::from_notation("Mb . . . Fr . . . Yb").unwrap();
        BoardSnapshot::from(&board)
    }

    #[test]
    fn test_valid_snapshot_round_trips() {
        let board = Board::from_notation("Mb . . . Fr . . . Yb").unwrap();
        let snapshot = BoardSnapshot::from(&board);
        assert_eq!(snapshot.validate().unwrap(), board);
    }

    #[test]
    fn test_missing_cell_is_rejected() {
        let mut snapshot = full_snapshot();
        snapshot.remove(Cell::C2);
        let err = snapshot.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidBoard { ref cell, .. } if cell == "c2"));
    }

    #[test]
    fn test_half_filled_cells_are_rejected() {
        let mut snapshot = full_snapshot();
        snapshot.insert(
            Cell::A2,
            CellSnapshot {
                icon: Some("fish".to_string()),
                color: None,
            },
        );
        assert!(snapshot.validate().is_err());

        let mut snapshot = full_snapshot();
        snapshot.insert(
            Cell::A2,
            CellSnapshot {
                icon: None,
                color: Some("red".to_string()),
            },
        );
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        let mut snapshot = full_snapshot();
        snapshot.insert(
            Cell::A2,
            CellSnapshot {
                icon: Some("shark".to_string()),
                color: Some("red".to_string()),
            },
        );
        assert!(snapshot.validate().is_err());

        let mut snapshot = full_snapshot();
        snapshot.insert(
            Cell::A2,
            CellSnapshot {
                icon: Some("fish".to_string()),
                color: Some("green".to_string()),
            },
        );
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_snapshot_deserializes_host_json() {
        let json = r#"{"cells": {
            "a1": {"icon": "pecheur", "color": "bleu", "isBlinking": false},
            "a2": {"icon": null, "color": null},
            "a3": {}, "b1": {}, "b2": {}, "b3": {}, "c1": {}, "c2": {}, "c3": {}
        }}"#;
        let snapshot: BoardSnapshot = serde_json::from_str(json).unwrap();
        let board = snapshot.validate().unwrap();
        assert_eq!(
            board.get(Cell::A1),
            Some(Piece::new(Icon::Fisherman, Color::Blue))
        );
        assert_eq!(board.occupied().count(), 1);
    }

    #[test]
    fn test_legality_follows_food_chain() {
        // a1 fisherman, b2 fish, c3 fly
        let board = Board::from_notation("Mb . . . Fr . . . Yb").unwrap();
        let legal = board.legal_cells(Icon::Fisherman);
        assert!(legal.contains(&Cell::B2), "fisherman catches fish");
        assert!(!legal.contains(&Cell::A1), "no capture of own icon");
        assert!(!legal.contains(&Cell::C3), "fly stings fisherman");
        assert_eq!(legal.len(), 7);
    }

    #[test]
    fn test_loose_view_skips_missing_and_unreadable_cells() {
        let mut snapshot = full_snapshot();
        snapshot.remove(Cell::A2);
        snapshot.insert(
            Cell::A3,
            CellSnapshot {
                icon: Some("???".to_string()),
                color: Some("red".to_string()),
            },
        );
        snapshot.insert(
            Cell::B1,
            CellSnapshot {
                icon: Some("fish".to_string()),
                color: None,
            },
        );
        let legal = snapshot.legal_cells(Icon::Fisherman);
        assert!(!legal.contains(&Cell::A2));
        assert!(!legal.contains(&Cell::A3));
        assert!(legal.contains(&Cell::B1), "icon alone decides capture");
    }
}
