//! Ranking of legal cells by aggregate line gain

use rand::{Rng, prelude::IndexedRandom};
use serde::Serialize;
use tracing::debug;

use super::{
    cache::EvaluationCache,
    encoder::{LineStates, StateEncoder},
    guard::Deadline,
    line_eval::{LineEvaluator, MoveEvaluation},
    value_table::StateValueTable,
};
use crate::{
    Error, Result,
    game::{Board, Cell, Icon, IconGrid, Piece, lines_through},
};

/// A legal cell and the piece it would capture, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegalMove {
    pub cell: Cell,
    pub captured: Option<Piece>,
}

impl LegalMove {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Full ranking produced by `MoveEvaluator::analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub legal_cells: Vec<Cell>,
    /// Highest gain first; equal gains keep cell order
    pub evaluations: Vec<MoveEvaluation>,
    pub best_cell: Option<Cell>,
    pub max_gain: i64,
    pub tie_count: usize,
}

/// Gain distribution over the legal cells of one position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StrategyStats {
    pub legal_moves: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub mean_gain: f64,
    pub best_gain: i64,
    pub worst_gain: i64,
}

/// Every legal cell for `icon`, in cell order
pub fn legal_moves(board: &Board, icon: Icon) -> Vec<LegalMove> {
    board
        .legal_cells(icon)
        .into_iter()
        .map(|cell| LegalMove {
            cell,
            captured: board.get(cell),
        })
        .collect()
}

/// Scores legal cells for one rolled piece and picks the best.
#[derive(Debug, Clone, Copy)]
pub struct MoveEvaluator<'t> {
    lines: LineEvaluator<'t>,
}

impl<'t> MoveEvaluator<'t> {
    pub fn new(table: &'t StateValueTable) -> Self {
        Self {
            lines: LineEvaluator::new(table),
        }
    }

    /// Gain of `piece` on `cell`, over exactly the lines through `cell`
    pub fn evaluate_cell<S>(&self, states: &mut S, cell: Cell, piece: Piece, board: &Board) -> MoveEvaluation
    where
        S: LineStates + ?Sized,
    {
        self.lines
            .total_gain(states, cell, piece, board, lines_through(cell))
    }

    fn evaluate_cached(
        &self,
        cache: &mut EvaluationCache,
        cell: Cell,
        piece: Piece,
        board: &Board,
    ) -> MoveEvaluation {
        if let Some(total_gain) = cache.cached_gain(cell, piece, board) {
            return MoveEvaluation {
                cell,
                total_gain,
                line_gains: Vec::new(),
            };
        }
        let evaluation = self.evaluate_cell(cache, cell, piece, board);
        cache.store_gain(cell, piece, board, evaluation.total_gain);
        evaluation
    }

    /// Evaluate `cells`, checking the deadline before each one.
    ///
    /// The result is sorted by descending gain; the sort is stable so ties
    /// stay in the order they were given.
    pub fn evaluate_all(
        &self,
        mut cache: Option<&mut EvaluationCache>,
        cells: &[Cell],
        piece: Piece,
        board: &Board,
        deadline: &Deadline,
    ) -> Result<Vec<MoveEvaluation>> {
        let mut evaluations = Vec::with_capacity(cells.len());
        for &cell in cells {
            deadline.check()?;
            let evaluation = match cache.as_deref_mut() {
                Some(cache) => self.evaluate_cached(cache, cell, piece, board),
                None => self.evaluate_cell(&mut StateEncoder, cell, piece, board),
            };
            debug!(%cell, gain = evaluation.total_gain, "evaluated cell");
            evaluations.push(evaluation);
        }
        evaluations.sort_by(|a, b| b.total_gain.cmp(&a.total_gain));
        Ok(evaluations)
    }

    /// Pick the cell with the highest total gain for `piece`.
    ///
    /// Returns `Ok(None)` when no cell is legal. When several cells share the
    /// maximum, one is drawn uniformly from `rng`.
    ///
    /// # Errors
    ///
    /// `ComputationTimeout` if `deadline` passes between two cells.
    pub fn select_best_move<R>(
        &self,
        cache: Option<&mut EvaluationCache>,
        board: &Board,
        piece: Piece,
        rng: &mut R,
        deadline: &Deadline,
    ) -> Result<Option<Cell>>
    where
        R: Rng + ?Sized,
    {
        let legal = board.legal_cells(piece.icon);
        if legal.is_empty() {
            debug!(%piece, "no legal cell");
            return Ok(None);
        }

        let evaluations = self.evaluate_all(cache, &legal, piece, board, deadline)?;
        let (best, max_gain, tie_count) = pick_among_best(&evaluations, rng)?;
        if tie_count > 1 {
            debug!(%best, max_gain, tie_count, "broke tie at random");
        }
        Ok(Some(best))
    }

    /// Rank every legal cell without touching any cache.
    pub fn analyze<R>(&self, board: &Board, piece: Piece, rng: &mut R) -> Result<Analysis>
    where
        R: Rng + ?Sized,
    {
        let legal_cells = board.legal_cells(piece.icon);
        if legal_cells.is_empty() {
            return Ok(Analysis {
                legal_cells,
                evaluations: Vec::new(),
                best_cell: None,
                max_gain: 0,
                tie_count: 0,
            });
        }

        let evaluations =
            self.evaluate_all(None, &legal_cells, piece, board, &Deadline::unbounded())?;
        let (best, max_gain, tie_count) = pick_among_best(&evaluations, rng)?;
        Ok(Analysis {
            legal_cells,
            evaluations,
            best_cell: Some(best),
            max_gain,
            tie_count,
        })
    }

    pub fn strategy_stats(&self, board: &Board, piece: Piece) -> StrategyStats {
        let gains: Vec<i64> = board
            .legal_cells(piece.icon)
            .into_iter()
            .map(|cell| {
                self.evaluate_cell(&mut StateEncoder, cell, piece, board)
                    .total_gain
            })
            .collect();
        if gains.is_empty() {
            return StrategyStats::default();
        }

        StrategyStats {
            legal_moves: gains.len(),
            positive: gains.iter().filter(|&&g| g > 0).count(),
            negative: gains.iter().filter(|&&g| g < 0).count(),
            neutral: gains.iter().filter(|&&g| g == 0).count(),
            mean_gain: gains.iter().map(|&g| g as f64).sum::<f64>() / gains.len() as f64,
            best_gain: gains.iter().copied().max().unwrap_or_default(),
            worst_gain: gains.iter().copied().min().unwrap_or_default(),
        }
    }
}

/// Uniform choice among the evaluations sharing the maximum gain.
///
/// Returns the chosen cell, the maximum gain, and how many cells tied.
fn pick_among_best<R>(evaluations: &[MoveEvaluation], rng: &mut R) -> Result<(Cell, i64, usize)>
where
    R: Rng + ?Sized,
{
    let max_gain = evaluations
        .iter()
        .map(|e| e.total_gain)
        .max()
        .ok_or_else(|| Error::Unexpected {
            message: "legal cells produced no evaluations".to_string(),
        })?;

    let best: Vec<Cell> = evaluations
        .iter()
        .filter(|e| e.total_gain == max_gain)
        .map(|e| e.cell)
        .collect();

    let chosen = match best.as_slice() {
        [only] => *only,
        ties => *ties.choose(rng).ok_or_else(|| Error::Unexpected {
            message: "empty tie list".to_string(),
        })?,
    };
    Ok((chosen, max_gain, best.len()))
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        adapters::EmbeddedTable,
        game::{Color, Icon},
        ports::TableSource,
    };

    fn shipped_table() -> StateValueTable {
        StateValueTable::from_records(&EmbeddedTable.fetch().unwrap()).unwrap()
    }

    #[test]
    fn test_empty_board_prefers_center() {
        let table = shipped_table();
        let evaluator = MoveEvaluator::new(&table);
        let mut rng = StdRng::seed_from_u64(42);

        for piece in Piece::all() {
            let best = evaluator
                .select_best_move(None, &Board::new(), piece, &mut rng, &Deadline::unbounded())
                .unwrap();
            assert_eq!(best, Some(Cell::B2), "{piece}");
        }
    }

    #[test]
    fn test_analysis_ranks_center_corners_sides() {
        let table = shipped_table();
        let evaluator = MoveEvaluator::new(&table);
        let mut rng = StdRng::seed_from_u64(7);
        let piece = Piece::new(Icon::Fish, Color::Blue);

        let analysis = evaluator.analyze(&Board::new(), piece, &mut rng).unwrap();
        assert_eq!(analysis.legal_cells.len(), 9);
        assert_eq!(analysis.max_gain, 40);
        assert_eq!(analysis.tie_count, 1);
        let gains: Vec<i64> = analysis.evaluations.iter().map(|e| e.total_gain).collect();
        assert_eq!(gains, vec![40, 30, 30, 30, 30, 20, 20, 20, 20]);
    }

    #[test]
    fn test_ties_are_reproducible_with_same_seed() {
        let table = shipped_table();
        let evaluator = MoveEvaluator::new(&table);
        // Center taken by an uncapturable piece: four corners tie
        let board = Board::from_notation(". . . . Yr . . . .").unwrap();
        let piece = Piece::new(Icon::Fisherman, Color::Blue);

        let first = evaluator
            .analyze(&board, piece, &mut StdRng::seed_from_u64(3))
            .unwrap();
        let second = evaluator
            .analyze(&board, piece, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(first.best_cell, second.best_cell);
        assert_eq!(first.tie_count, 4);
        assert!(matches!(
            first.best_cell,
            Some(Cell::A1 | Cell::A3 | Cell::C1 | Cell::C3)
        ));
    }

    #[test]
    fn test_no_legal_cell_yields_none() {
        let table = shipped_table();
        let evaluator = MoveEvaluator::new(&table);
        let board = Board::from_notation("Fb Fb Fr Fr Fb Fr Fb Fr Fb").unwrap();
        let piece = Piece::new(Icon::Fly, Color::Red);
        let mut rng = StdRng::seed_from_u64(1);

        let best = evaluator
            .select_best_move(None, &board, piece, &mut rng, &Deadline::unbounded())
            .unwrap();
        assert_eq!(best, None);

        let analysis = evaluator.analyze(&board, piece, &mut rng).unwrap();
        assert!(analysis.legal_cells.is_empty());
        assert_eq!(analysis.best_cell, None);
        assert_eq!(analysis.tie_count, 0);
    }

    #[test]
    fn test_expired_deadline_times_out() {
        let table = shipped_table();
        let evaluator = MoveEvaluator::new(&table);
        let piece = Piece::new(Icon::Fly, Color::Red);
        let mut rng = StdRng::seed_from_u64(1);

        let result = evaluator.select_best_move(
            None,
            &Board::new(),
            piece,
            &mut rng,
            &Deadline::start(std::time::Duration::ZERO),
        );
        assert!(matches!(result, Err(Error::ComputationTimeout { .. })));
    }

    #[test]
    fn test_cache_serves_repeated_evaluations() {
        let table = shipped_table();
        let evaluator = MoveEvaluator::new(&table);
        let piece = Piece::new(Icon::Fisherman, Color::Red);
        let board = Board::from_notation("Mb . . . Fr . . . .").unwrap();
        let mut cache = EvaluationCache::default();
        let mut rng = StdRng::seed_from_u64(9);
        let deadline = Deadline::unbounded();

        evaluator
            .select_best_move(Some(&mut cache), &board, piece, &mut rng, &deadline)
            .unwrap();
        let after_first = cache.stats().evaluations;
        evaluator
            .select_best_move(Some(&mut cache), &board, piece, &mut rng, &deadline)
            .unwrap();
        let after_second = cache.stats().evaluations;

        let legal = board.legal_cells(piece.icon).len() as u64;
        assert_eq!(after_first.misses, legal);
        assert_eq!(after_second.hits, legal);
    }

    #[test]
    fn test_legal_moves_report_captures() {
        let board = Board::from_notation(". . . . Fr . . . .").unwrap();
        let moves = legal_moves(&board, Icon::Fisherman);
        let center = moves.iter().find(|m| m.cell == Cell::B2).unwrap();
        assert!(center.is_capture());
        assert_eq!(center.captured, Some(Piece::new(Icon::Fish, Color::Red)));
        assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 1);
    }

    #[test]
    fn test_strategy_stats_on_empty_board() {
        let table = shipped_table();
        let evaluator = MoveEvaluator::new(&table);
        let stats = evaluator.strategy_stats(&Board::new(), Piece::new(Icon::Fly, Color::Blue));
        assert_eq!(stats.legal_moves, 9);
        assert_eq!(stats.positive, 9);
        assert_eq!(stats.best_gain, 40);
        assert_eq!(stats.worst_gain, 20);
        assert!((stats.mean_gain - 240.0 / 9.0).abs() < 1e-9);
    }
}
