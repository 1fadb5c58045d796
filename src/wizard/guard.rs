//! Failure guard: time budget, fallback move, error statistics

use std::{
    collections::{BTreeMap, HashMap},
    time::{Duration, Instant},
};

use tracing::{debug, error, warn};

use crate::{
    Error, ErrorKind, Result,
    game::{Cell, Icon, IconGrid},
};

/// Default wall-clock budget for one evaluation
pub const DEFAULT_BUDGET: Duration = Duration::from_millis(1000);

/// Evaluations slower than this are logged even when within budget
pub const SLOW_EVALUATION: Duration = Duration::from_millis(100);

/// Cooperative deadline checked between units of work
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// A deadline that never expires
    pub fn unbounded() -> Self {
        Self::start(Duration::MAX)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed() >= self.budget
    }

    /// # Errors
    ///
    /// `ComputationTimeout` once the budget is spent.
    pub fn check(&self) -> Result<()> {
        let elapsed = self.elapsed();
        if elapsed >= self.budget {
            return Err(Error::ComputationTimeout {
                elapsed_ms: elapsed.as_millis(),
                budget_ms: self.budget.as_millis(),
            });
        }
        Ok(())
    }
}

/// Every occurrence of one kind since the last reset, oldest first
#[derive(Debug, Clone, Default)]
struct KindLog {
    seen: Vec<Instant>,
}

/// Counts of fallback-triggering failures, by kind
#[derive(Debug, Clone, Default)]
pub struct ErrorStats {
    kinds: HashMap<ErrorKind, KindLog>,
}

impl ErrorStats {
    pub fn record(&mut self, kind: ErrorKind) {
        self.record_at(kind, Instant::now());
    }

    fn record_at(&mut self, kind: ErrorKind, at: Instant) {
        self.kinds.entry(kind).or_default().seen.push(at);
    }

    pub fn total_errors(&self) -> usize {
        self.kinds.values().map(|log| log.seen.len()).sum()
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.kinds.get(&kind).map_or(0, |log| log.seen.len())
    }

    pub fn last_seen(&self, kind: ErrorKind) -> Option<Instant> {
        self.kinds.get(&kind).and_then(|log| log.seen.last().copied())
    }

    /// Count for every kind, zeros included
    pub fn by_kind(&self) -> BTreeMap<ErrorKind, usize> {
        ErrorKind::ALL
            .into_iter()
            .map(|kind| (kind, self.count(kind)))
            .collect()
    }

    /// Last occurrence of every kind seen at least once
    pub fn last_seen_by_kind(&self) -> BTreeMap<ErrorKind, Instant> {
        ErrorKind::ALL
            .into_iter()
            .filter_map(|kind| self.last_seen(kind).map(|at| (kind, at)))
            .collect()
    }

    /// Whether at least `max_count` failures of `kind` happened within `window`.
    ///
    /// Hosts use this to switch the wizard off when it keeps failing.
    pub fn is_too_frequent(&self, kind: ErrorKind, max_count: usize, window: Duration) -> bool {
        self.is_too_frequent_at(kind, max_count, window, Instant::now())
    }

    fn is_too_frequent_at(
        &self,
        kind: ErrorKind,
        max_count: usize,
        window: Duration,
        now: Instant,
    ) -> bool {
        let Some(log) = self.kinds.get(&kind) else {
            return false;
        };
        let first_in_window = log
            .seen
            .partition_point(|&at| now.saturating_duration_since(at) >= window);
        log.seen.len() - first_in_window >= max_count.max(1)
    }

    pub fn reset(&mut self) {
        self.kinds.clear();
    }
}

/// Cheap table-free choice: the first legal cell in center, corner, side order.
///
/// Works on any icon view, including boards that failed validation.
pub fn fallback_move<G>(grid: &G, icon: Icon) -> Option<Cell>
where
    G: IconGrid + ?Sized,
{
    Cell::PRIORITY
        .into_iter()
        .find(|&cell| grid.is_legal(cell, icon))
}

/// Runs an evaluation under a time budget and turns every failure into the
/// fallback move, so callers always get a cell or `None`.
#[derive(Debug, Clone)]
pub struct FailureGuard {
    budget: Duration,
    stats: ErrorStats,
}

impl FailureGuard {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            stats: ErrorStats::default(),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn stats(&self) -> &ErrorStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Run `attempt` against a fresh deadline.
    ///
    /// A result that arrives after the budget is discarded as a timeout.
    /// `NoValidMoves` is passed through as `None` without being counted.
    pub fn run<G, F>(&mut self, grid: &G, icon: Icon, attempt: F) -> Option<Cell>
    where
        G: IconGrid + ?Sized,
        F: FnOnce(&Deadline) -> Result<Option<Cell>>,
    {
        let deadline = Deadline::start(self.budget);
        let outcome = attempt(&deadline).and_then(|choice| deadline.check().map(|()| choice));

        let elapsed = deadline.elapsed();
        if elapsed > SLOW_EVALUATION {
            warn!(elapsed_ms = elapsed.as_millis(), "slow wizard evaluation");
        }

        match outcome {
            Ok(choice) => choice,
            Err(err) => {
                let kind = err.kind();
                if kind.is_malfunction() {
                    self.stats.record(kind);
                    error!(%kind, error = %err, "wizard evaluation failed, using fallback");
                } else {
                    debug!(%kind, %icon, "no legal move");
                }
                fallback_move(grid, icon)
            }
        }
    }
}

impl Default for FailureGuard {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, BoardSnapshot};

    #[test]
    fn test_fallback_prefers_center_then_corners_then_sides() {
        let icon = Icon::Fisherman;
        assert_eq!(fallback_move(&Board::new(), icon), Some(Cell::B2));

        // Center and a1 hold flies, which sting fishermen
        let board = Board::from_notation("Yb . . . Yr . . . .").unwrap();
        assert_eq!(fallback_move(&board, icon), Some(Cell::A3));

        let corners_blocked = Board::from_notation("Yb . Yb . Yr . Yr . Mr").unwrap();
        assert_eq!(fallback_move(&corners_blocked, icon), Some(Cell::A2));
    }

    #[test]
    fn test_fallback_takes_captures() {
        let board = Board::from_notation("Yb Yb Yb Yb Fr Yb Yb Yb Yb").unwrap();
        assert_eq!(fallback_move(&board, Icon::Fisherman), Some(Cell::B2));
        assert_eq!(fallback_move(&board, Icon::Fly), None);
    }

    #[test]
    fn test_guard_passes_successful_result_through() {
        let mut guard = FailureGuard::default();
        assert_eq!(guard.budget(), DEFAULT_BUDGET);
        let choice = guard.run(&Board::new(), Icon::Fish, |_| Ok(Some(Cell::C3)));
        assert_eq!(choice, Some(Cell::C3));
        assert_eq!(guard.stats().total_errors(), 0);
    }

    #[test]
    fn test_guard_falls_back_and_counts_malfunctions() {
        let mut guard = FailureGuard::default();
        let choice = guard.run(&Board::new(), Icon::Fish, |_| Err(Error::ValueTableNotLoaded));
        assert_eq!(choice, Some(Cell::B2));
        assert_eq!(guard.stats().count(ErrorKind::ValueTableNotLoaded), 1);
        assert_eq!(guard.stats().total_errors(), 1);
    }

    #[test]
    fn test_guard_does_not_count_no_valid_moves() {
        let mut guard = FailureGuard::default();
        let full = Board::from_notation("Mb Mb Mb Mr Mr Mr Mb Mr Mb").unwrap();
        let choice = guard.run(&full, Icon::Fish, |_| {
            Err(Error::NoValidMoves { icon: Icon::Fish })
        });
        assert_eq!(choice, None);
        assert_eq!(guard.stats().total_errors(), 0);
    }

    #[test]
    fn test_zero_budget_discards_late_result() {
        let mut guard = FailureGuard::new(Duration::ZERO);
        assert_eq!(guard.budget(), Duration::ZERO);
        let board = Board::from_notation(". . . . Yr . . . .").unwrap();
        let choice = guard.run(&board, Icon::Fisherman, |_| Ok(Some(Cell::C2)));
        assert_eq!(choice, Some(Cell::A1));
        assert_eq!(guard.stats().count(ErrorKind::ComputationTimeout), 1);
    }

    #[test]
    fn test_guard_works_on_invalid_snapshots() {
        let mut snapshot = BoardSnapshot::from(&Board::new());
        snapshot.remove(Cell::B2);
        let mut guard = FailureGuard::default();
        let choice = guard.run(&snapshot, Icon::Fly, |_| {
            Err(Error::invalid_board(Cell::B2, "cell is missing"))
        });
        assert_eq!(choice, Some(Cell::A1));
        assert_eq!(guard.stats().count(ErrorKind::InvalidBoard), 1);
    }

    #[test]
    fn test_frequency_window() {
        let mut stats = ErrorStats::default();
        let start = Instant::now();
        for _ in 0..3 {
            stats.record_at(ErrorKind::ComputationTimeout, start);
        }
        let window = Duration::from_secs(60);

        assert!(stats.is_too_frequent_at(ErrorKind::ComputationTimeout, 3, window, start));
        assert!(!stats.is_too_frequent_at(ErrorKind::ComputationTimeout, 4, window, start));
        assert!(!stats.is_too_frequent_at(ErrorKind::InvalidBoard, 1, window, start));

        let later = start + Duration::from_secs(61);
        assert!(!stats.is_too_frequent_at(ErrorKind::ComputationTimeout, 1, window, later));
        assert_eq!(stats.count(ErrorKind::ComputationTimeout), 3);
    }

    #[test]
    fn test_frequency_counts_every_error_in_window() {
        let mut stats = ErrorStats::default();
        let start = Instant::now();
        for _ in 0..40 {
            stats.record_at(ErrorKind::Unexpected, start);
        }
        let later = start + Duration::from_secs(30);
        for _ in 0..100 {
            stats.record_at(ErrorKind::Unexpected, later);
        }
        let window = Duration::from_secs(60);

        assert_eq!(stats.count(ErrorKind::Unexpected), 140);
        assert!(stats.is_too_frequent_at(ErrorKind::Unexpected, 140, window, later));
        assert!(!stats.is_too_frequent_at(ErrorKind::Unexpected, 141, window, later));

        // Only the second burst is still inside the window
        let end = start + Duration::from_secs(75);
        assert!(stats.is_too_frequent_at(ErrorKind::Unexpected, 100, window, end));
        assert!(!stats.is_too_frequent_at(ErrorKind::Unexpected, 101, window, end));
    }

    #[test]
    fn test_by_kind_lists_every_kind() {
        let mut stats = ErrorStats::default();
        stats.record(ErrorKind::InvalidBoard);
        let by_kind = stats.by_kind();
        assert_eq!(by_kind.len(), 5);
        assert_eq!(by_kind[&ErrorKind::InvalidBoard], 1);
        assert_eq!(by_kind[&ErrorKind::Unexpected], 0);
        assert_eq!(stats.last_seen_by_kind().len(), 1);
    }

    #[test]
    fn test_unbounded_deadline_never_expires() {
        assert!(Deadline::unbounded().check().is_ok());
        assert!(Deadline::start(Duration::ZERO).is_expired());
    }
}
