//! Bounded memoization of line states and move gains

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use super::encoder::{LineStates, StateEncoder, StateId};
use crate::game::{Board, Cell, Line, Piece};

pub const DEFAULT_CAPACITY: usize = 1000;

/// Size and hit counters of one cache map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MapStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub line_states: MapStats,
    pub evaluations: MapStats,
}

/// String-keyed map that evicts its oldest insertion when full
#[derive(Debug, Clone)]
struct FifoMap<V> {
    entries: HashMap<String, V>,
    order: VecDeque<String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<V: Copy> FifoMap<V> {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    fn get(&mut self, key: &str) -> Option<V> {
        let found = self.entries.get(key).copied();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    fn insert(&mut self, key: String, value: V) {
        if self.capacity == 0 {
            return;
        }
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return;
        }
        while self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.order.pop_front() {
            self.entries.remove(&oldest);
        }
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > capacity {
            self.evict_oldest();
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn stats(&self) -> MapStats {
        MapStats {
            size: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Memoizes line encodings and whole-move gains.
///
/// Both maps are keyed by fingerprints built from the occupied cells only,
/// and evict first-in first-out once `capacity` entries are stored. The cache
/// never changes a result, only how often it is computed.
#[derive(Debug, Clone)]
pub struct EvaluationCache {
    line_states: FifoMap<StateId>,
    evaluations: FifoMap<i64>,
}

impl EvaluationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            line_states: FifoMap::new(capacity),
            evaluations: FifoMap::new(capacity),
        }
    }

    /// Key for the state of `line` on `board`, e.g. `line:/:a1:Mb,c3:Fr`
    pub fn line_key(line: &Line, board: &Board) -> String {
        let occupants: Vec<String> = line
            .cells
            .iter()
            .filter_map(|&cell| board.get(cell).map(|piece| format!("{cell}:{}", piece.code())))
            .collect();
        format!("line:{}:{}", line.id.name(), occupants.join(","))
    }

    /// Key for playing `piece` on `cell` of `board`
    pub fn evaluation_key(cell: Cell, piece: Piece, board: &Board) -> String {
        format!(
            "eval:{cell}:{}:{}:{}",
            piece.icon,
            piece.color,
            board.fingerprint()
        )
    }

    pub fn cached_gain(&mut self, cell: Cell, piece: Piece, board: &Board) -> Option<i64> {
        self.evaluations
            .get(&Self::evaluation_key(cell, piece, board))
    }

    pub fn store_gain(&mut self, cell: Cell, piece: Piece, board: &Board, gain: i64) {
        self.evaluations
            .insert(Self::evaluation_key(cell, piece, board), gain);
    }

    pub fn has_line_state(&self, line: &Line, board: &Board) -> bool {
        self.line_states.contains(&Self::line_key(line, board))
    }

    /// Shrink or grow both maps; shrinking evicts the oldest entries.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.line_states.set_capacity(capacity);
        self.evaluations.set_capacity(capacity);
    }

    /// Drop all entries and counters (between games, or for test isolation)
    pub fn clear(&mut self) {
        self.line_states.clear();
        self.evaluations.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            line_states: self.line_states.stats(),
            evaluations: self.evaluations.stats(),
        }
    }
}

impl Default for EvaluationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl LineStates for EvaluationCache {
    fn line_state(&mut self, line: &Line, board: &Board) -> StateId {
        let key = Self::line_key(line, board);
        if let Some(state) = self.line_states.get(&key) {
            return state;
        }
        let state = StateEncoder::encode(line, board);
        self.line_states.insert(key, state);
        state
    }
}
