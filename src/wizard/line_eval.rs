//! Per-line gain of a hypothetical move

use serde::Serialize;

use super::{
    encoder::{LineStates, StateId},
    value_table::StateValueTable,
};
use crate::game::{Board, Cell, Line, LineId, Piece};

/// Contribution of one line to a move's gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineGain {
    pub line: LineId,
    pub before: StateId,
    pub after: StateId,
    pub value_before: i32,
    pub value_after: i32,
    pub gain: i64,
}

/// Gain of playing one piece on one cell, with its per-line breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveEvaluation {
    pub cell: Cell,
    pub total_gain: i64,
    /// Empty when the total came from the evaluation cache
    pub line_gains: Vec<LineGain>,
}

/// Computes `value(after) - value(before)` for lines touched by a move.
///
/// This is the only arithmetic the wizard performs; everything above it is
/// a sum of these differences. Gains are widened to `i64` so no table
/// values can overflow them.
#[derive(Debug, Clone, Copy)]
pub struct LineEvaluator<'t> {
    table: &'t StateValueTable,
}

impl<'t> LineEvaluator<'t> {
    pub fn new(table: &'t StateValueTable) -> Self {
        Self { table }
    }

    /// Gain on `line` from playing `piece` on `target`.
    ///
    /// Returns 0 when `target` is not on `line`.
    pub fn gain<S>(&self, states: &mut S, line: &Line, target: Cell, piece: Piece, board: &Board) -> i64
    where
        S: LineStates + ?Sized,
    {
        self.line_gain(states, line, target, piece, board)
            .map_or(0, |line_gain| line_gain.gain)
    }

    /// Full breakdown for one line, `None` when `target` is not on it
    pub fn line_gain<S>(
        &self,
        states: &mut S,
        line: &Line,
        target: Cell,
        piece: Piece,
        board: &Board,
    ) -> Option<LineGain>
    where
        S: LineStates + ?Sized,
    {
        if !line.contains(target) {
            return None;
        }

        let before = states.line_state(line, board);
        let after = states.line_state(line, &board.with_piece(target, piece));
        let value_before = self.table.value_for(before, piece.color);
        let value_after = self.table.value_for(after, piece.color);

        Some(LineGain {
            line: line.id,
            before,
            after,
            value_before,
            value_after,
            gain: i64::from(value_after) - i64::from(value_before),
        })
    }

    /// Sum of gains over `lines`, keeping the breakdown.
    pub fn total_gain<'l, S, I>(
        &self,
        states: &mut S,
        target: Cell,
        piece: Piece,
        board: &Board,
        lines: I,
    ) -> MoveEvaluation
    where
        S: LineStates + ?Sized,
        I: IntoIterator<Item = &'l Line>,
    {
        let line_gains: Vec<LineGain> = lines
            .into_iter()
            .filter_map(|line| self.line_gain(states, line, target, piece, board))
            .collect();
        let total_gain = line_gains.iter().map(|lg| lg.gain).sum();

        MoveEvaluation {
            cell: target,
            total_gain,
            line_gains,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::EmbeddedTable,
        game::{Color, Icon, LINES, lines_through},
        ports::TableSource,
        wizard::{EvaluationCache, StateEncoder, TableRecord},
    };

    fn shipped_table() -> StateValueTable {
        StateValueTable::from_records(&EmbeddedTable.fetch().unwrap()).unwrap()
    }

    #[test]
    fn test_gain_is_zero_off_line() {
        let table = shipped_table();
        let evaluator = LineEvaluator::new(&table);
        let piece = Piece::new(Icon::Fish, Color::Blue);
        let row3 = LINES.iter().find(|l| l.id == LineId::Row3).unwrap();

        let gain = evaluator.gain(&mut StateEncoder, row3, Cell::A1, piece, &Board::new());
        assert_eq!(gain, 0);
    }

    #[test]
    fn test_first_piece_on_empty_line() {
        let table = shipped_table();
        let evaluator = LineEvaluator::new(&table);
        let piece = Piece::new(Icon::Fish, Color::Red);

        let gain = evaluator.gain(&mut StateEncoder, &LINES[0], Cell::A2, piece, &Board::new());
        assert_eq!(gain, 10);
    }

    #[test]
    fn test_capture_breaks_opponent_pair() {
        let table = shipped_table();
        let evaluator = LineEvaluator::new(&table);
        // Red fish on a1 and a2; blue fisherman captures a2
        let board = Board::from_notation("Fr Fr . . . . . . .").unwrap();
        let fisherman = Piece::new(Icon::Fisherman, Color::Blue);

        let breakdown = evaluator
            .line_gain(&mut StateEncoder, &LINES[0], Cell::A2, fisherman, &board)
            .unwrap();
        assert_eq!(breakdown.value_before, -100);
        assert_eq!(breakdown.value_after, 0);
        assert_eq!(breakdown.gain, 100);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let table = StateValueTable::from_records(&[
            TableRecord::new(100_000, i32::MIN, 0),
            TableRecord::new(200_000, i32::MAX, 0),
        ])
        .unwrap();
        let evaluator = LineEvaluator::new(&table);
        let board = Board::from_notation("Mb . . . . . . . .").unwrap();
        let fisherman = Piece::new(Icon::Fisherman, Color::Blue);

        let gain = evaluator.gain(&mut StateEncoder, &LINES[0], Cell::A2, fisherman, &board);
        assert_eq!(gain, i64::from(i32::MAX) - i64::from(i32::MIN));

        // Three fresh lines fall to i32::MIN while the diagonal climbs to i32::MAX
        let center = evaluator.total_gain(&mut StateEncoder, Cell::B2, fisherman, &board, &LINES);
        assert_eq!(center.total_gain, i64::from(i32::MAX) + 2 * i64::from(i32::MIN));
    }

    #[test]
    fn test_total_gain_sums_lines_through_cell() {
        let table = shipped_table();
        let evaluator = LineEvaluator::new(&table);
        let piece = Piece::new(Icon::Fly, Color::Blue);

        let center = evaluator.total_gain(
            &mut StateEncoder,
            Cell::B2,
            piece,
            &Board::new(),
            lines_through(Cell::B2),
        );
        assert_eq!(center.line_gains.len(), 4);
        assert_eq!(center.total_gain, 40);

        let side = evaluator.total_gain(
            &mut StateEncoder,
            Cell::A2,
            piece,
            &Board::new(),
            lines_through(Cell::A2),
        );
        assert_eq!(side.total_gain, 20);
    }

    #[test]
    fn test_total_gain_skips_lines_without_target() {
        let table = shipped_table();
        let evaluator = LineEvaluator::new(&table);
        let piece = Piece::new(Icon::Fly, Color::Blue);

        let all = evaluator.total_gain(&mut StateEncoder, Cell::A2, piece, &Board::new(), &LINES);
        assert_eq!(all.line_gains.len(), 2);
    }

    #[test]
    fn test_cached_states_give_same_gain() {
        let table = shipped_table();
        let evaluator = LineEvaluator::new(&table);
        let board = Board::from_notation("Mb . Yr . Fb . . Mr .").unwrap();
        let piece = Piece::new(Icon::Fisherman, Color::Red);
        let mut cache = EvaluationCache::default();

        for cell in Cell::ALL {
            let direct =
                evaluator.total_gain(&mut StateEncoder, cell, piece, &board, lines_through(cell));
            let cached = evaluator.total_gain(&mut cache, cell, piece, &board, lines_through(cell));
            assert_eq!(direct, cached);
        }
    }
}
