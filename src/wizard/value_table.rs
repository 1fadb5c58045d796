//! Precomputed line values, looked up by state id

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::encoder::StateId;
use crate::{Error, Result, game::Color, ports::TableSource};

/// Value of one line state from each color's perspective
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineValue {
    pub blue: i32,
    pub red: i32,
}

impl LineValue {
    pub fn for_color(self, color: Color) -> i32 {
        match color {
            Color::Blue => self.blue,
            Color::Red => self.red,
        }
    }
}

/// A state id as written in a table document: a number, or digits with
/// separators such as `"100 010"` or `"10,000"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawStateId {
    Number(u64),
    Text(String),
}

impl RawStateId {
    pub fn normalize(&self) -> Result<StateId> {
        let raw = match self {
            RawStateId::Number(n) => *n,
            RawStateId::Text(text) => {
                let digits: String = text
                    .chars()
                    .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '_' | '\''))
                    .collect();
                if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(Error::InvalidStateId {
                        raw: text.clone(),
                        reason: "not a digit string".to_string(),
                    });
                }
                digits.parse::<u64>().map_err(|e| Error::InvalidStateId {
                    raw: text.clone(),
                    reason: e.to_string(),
                })?
            }
        };

        let state = u32::try_from(raw)
            .map(StateId::new)
            .map_err(|_| self.invalid("out of range"))?;
        if !state.is_valid_occupancy() {
            return Err(self.invalid("not a possible line occupancy"));
        }
        Ok(state)
    }

    fn invalid(&self, reason: &str) -> Error {
        let raw = match self {
            RawStateId::Number(n) => n.to_string(),
            RawStateId::Text(text) => text.clone(),
        };
        Error::InvalidStateId {
            raw,
            reason: reason.to_string(),
        }
    }
}

/// One record of the value table document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    #[serde(alias = "stateId", alias = "etat")]
    pub state: RawStateId,
    #[serde(alias = "valueA", alias = "bleu")]
    pub blue: i32,
    #[serde(alias = "valueB", alias = "rouge")]
    pub red: i32,
}

impl TableRecord {
    pub fn new(state: u32, blue: i32, red: i32) -> Self {
        Self {
            state: RawStateId::Number(u64::from(state)),
            blue,
            red,
        }
    }
}

/// Read-only map from line state to value, loaded once.
///
/// States absent from the table are worth 0 to both colors.
#[derive(Debug, Clone, Default)]
pub struct StateValueTable {
    values: HashMap<StateId, LineValue>,
    loaded: bool,
}

impl StateValueTable {
    /// Create an unloaded table; every lookup yields 0 until `load` succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a loaded table from already-parsed records.
    ///
    /// # Errors
    ///
    /// Fails on an empty record list, a malformed state id, or a state listed
    /// twice with different values.
    pub fn from_records(records: &[TableRecord]) -> Result<Self> {
        let values = Self::parse_records(records, "records")?;
        Ok(Self {
            values,
            loaded: true,
        })
    }

    /// Load from `source` unless already loaded.
    ///
    /// Parsing happens into a fresh map which replaces the current one only
    /// when every record is valid.
    pub fn load(&mut self, source: &dyn TableSource) -> Result<()> {
        if self.loaded {
            debug!(states = self.values.len(), "line value table already loaded");
            return Ok(());
        }

        let name = source.name();
        let records = source.fetch()?;
        let values = Self::parse_records(&records, &name)?;

        info!(source = %name, states = values.len(), "loaded line value table");
        self.values = values;
        self.loaded = true;
        Ok(())
    }

    fn parse_records(records: &[TableRecord], source_name: &str) -> Result<HashMap<StateId, LineValue>> {
        if records.is_empty() {
            return Err(Error::EmptyTable {
                source_name: source_name.to_string(),
            });
        }

        let mut values = HashMap::with_capacity(records.len());
        for record in records {
            let state = record.state.normalize()?;
            let value = LineValue {
                blue: record.blue,
                red: record.red,
            };
            match values.insert(state, value) {
                Some(previous) if previous != value => {
                    return Err(Error::DuplicateState {
                        state: state.as_u32(),
                    });
                }
                _ => {}
            }
        }
        Ok(values)
    }

    /// Value of `state` for `color`, or 0 when unknown
    pub fn value_for(&self, state: StateId, color: Color) -> i32 {
        if !self.loaded {
            warn!(%state, "line value table not loaded, using 0");
            return 0;
        }
        match self.values.get(&state) {
            Some(value) => value.for_color(color),
            None => {
                warn!(%state, "state missing from line value table, using 0");
                0
            }
        }
    }

    pub fn get(&self, state: StateId) -> Option<LineValue> {
        self.values.get(&state).copied()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.values.contains_key(&state)
    }

    /// All known states in ascending order
    pub fn states(&self) -> Vec<StateId> {
        let mut states: Vec<_> = self.values.keys().copied().collect();
        states.sort();
        states
    }

    /// Forget everything (test isolation)
    pub fn reset(&mut self) {
        self.values.clear();
        self.loaded = false;
    }
}
