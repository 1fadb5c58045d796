//! Host-facing wizard engine

use std::{sync::Arc, time::Duration};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, error};

use super::{
    cache::{CacheStats, EvaluationCache},
    evaluator::{Analysis, MoveEvaluator, StrategyStats},
    guard::{ErrorStats, FailureGuard},
    value_table::StateValueTable,
};
use crate::{
    Error, ErrorKind, Result,
    app::EngineConfig,
    game::{Board, BoardSnapshot, Cell, Color, Icon, Piece},
    ports::TableSource,
};

/// The wizard opponent.
///
/// Owns the value table, the evaluation cache, the tie-break generator and
/// the failure guard. `select_best_move` never fails: every malfunction is
/// absorbed by the guard and answered with the fallback move.
///
/// # Examples
///
/// ```
/// use piscari::app::App;
/// use piscari::game::{Board, BoardSnapshot, Cell, Color, Icon};
///
/// let mut engine = App::new().create_ready_engine(Default::default())?;
/// let board = BoardSnapshot::from(&Board::new());
/// assert_eq!(engine.select_best_move(&board, Icon::Fish, Color::Blue), Some(Cell::B2));
/// # Ok::<(), piscari::Error>(())
/// ```
pub struct Engine {
    config: EngineConfig,
    source: Arc<dyn TableSource + Send + Sync>,
    table: StateValueTable,
    /// `None` when caching is disabled
    cache: Option<EvaluationCache>,
    rng: StdRng,
    guard: FailureGuard,
}

impl Engine {
    /// Create an engine that will load its table from `source`.
    ///
    /// The table is not loaded until `initialize` is called; until then every
    /// move comes from the fallback.
    pub fn new(config: EngineConfig, source: Arc<dyn TableSource + Send + Sync>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let cache = config
            .cache_enabled
            .then(|| EvaluationCache::new(config.cache_capacity));

        Self {
            guard: FailureGuard::new(config.timeout()),
            config,
            source,
            table: StateValueTable::new(),
            cache,
            rng,
        }
    }

    /// Load the value table. Calling again once loaded does nothing.
    ///
    /// # Errors
    ///
    /// Returns the source or parse error; the engine stays unready and keeps
    /// answering with the fallback.
    pub fn initialize(&mut self) -> Result<()> {
        let source: &dyn TableSource = &*self.source;
        self.table.load(source).inspect_err(|err| {
            error!(source = %source.name(), error = %err, "failed to load line value table");
        })
    }

    pub fn is_ready(&self) -> bool {
        self.table.is_loaded()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &StateValueTable {
        &self.table
    }

    /// Best cell for `icon` and `color` on a host board.
    ///
    /// Returns `None` only when no cell is legal.
    pub fn select_best_move(
        &mut self,
        snapshot: &BoardSnapshot,
        icon: Icon,
        color: Color,
    ) -> Option<Cell> {
        let Self {
            table,
            cache,
            rng,
            guard,
            ..
        } = self;
        let table: &StateValueTable = table;
        let piece = Piece::new(icon, color);

        let choice = guard.run(snapshot, icon, |deadline| {
            let board = snapshot.validate()?;
            if !table.is_loaded() {
                return Err(Error::ValueTableNotLoaded);
            }
            MoveEvaluator::new(table).select_best_move(cache.as_mut(), &board, piece, rng, deadline)
        });
        debug!(%piece, choice = ?choice, "wizard move");
        choice
    }

    /// `select_best_move` for an already typed board
    pub fn select_best_move_on(&mut self, board: &Board, icon: Icon, color: Color) -> Option<Cell> {
        self.select_best_move(&BoardSnapshot::from(board), icon, color)
    }

    /// Rank every legal cell using the engine's own generator for ties.
    ///
    /// # Errors
    ///
    /// `ValueTableNotLoaded` before a successful `initialize`.
    pub fn analyze(&mut self, board: &Board, icon: Icon, color: Color) -> Result<Analysis> {
        self.ensure_ready()?;
        MoveEvaluator::new(&self.table).analyze(board, Piece::new(icon, color), &mut self.rng)
    }

    /// Rank every legal cell, breaking ties with `rng`.
    ///
    /// # Errors
    ///
    /// `ValueTableNotLoaded` before a successful `initialize`.
    pub fn analyze_with_rng<R>(&self, board: &Board, icon: Icon, color: Color, rng: &mut R) -> Result<Analysis>
    where
        R: Rng + ?Sized,
    {
        self.ensure_ready()?;
        MoveEvaluator::new(&self.table).analyze(board, Piece::new(icon, color), rng)
    }

    /// # Errors
    ///
    /// `ValueTableNotLoaded` before a successful `initialize`.
    pub fn strategy_stats(&self, board: &Board, icon: Icon, color: Color) -> Result<StrategyStats> {
        self.ensure_ready()?;
        Ok(MoveEvaluator::new(&self.table).strategy_stats(board, Piece::new(icon, color)))
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(Error::ValueTableNotLoaded)
        }
    }

    pub fn error_stats(&self) -> &ErrorStats {
        self.guard.stats()
    }

    pub fn is_error_too_frequent(&self, kind: ErrorKind, max_count: usize, window: Duration) -> bool {
        self.guard.stats().is_too_frequent(kind, max_count, window)
    }

    pub fn reset_error_stats(&mut self) {
        self.guard.reset_stats();
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    /// `None` when caching is disabled
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(EvaluationCache::stats)
    }

    pub fn set_cache_capacity(&mut self, capacity: usize) {
        self.config.cache_capacity = capacity;
        if let Some(cache) = self.cache.as_mut() {
            cache.set_capacity(capacity);
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("source", &self.source.name())
            .field("ready", &self.is_ready())
            .field("states", &self.table.len())
            .finish_non_exhaustive()
    }
}
