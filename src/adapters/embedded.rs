//! The line value table shipped with the crate.

use crate::{Result, ports::TableSource, wizard::TableRecord};

const SHIPPED_TABLE: &str = include_str!("../../assets/line_values.json");

/// Table source backed by `assets/line_values.json`, compiled into the binary.
///
/// The shipped table holds all 84 possible line occupancies. From one color's
/// view a line holding only that color's pieces of a single icon is worth
/// 10, 100 or 10000 for one, two or three pieces; the opponent's equivalent
/// lines are the negatives, and lines mixing colors are worth 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTable;

impl EmbeddedTable {
    pub fn new() -> Self {
        Self
    }

    /// Raw JSON document of the shipped table
    pub fn document() -> &'static str {
        SHIPPED_TABLE
    }
}

impl TableSource for EmbeddedTable {
    fn name(&self) -> String {
        "embedded line_values.json".to_string()
    }

    fn fetch(&self) -> Result<Vec<TableRecord>> {
        Ok(serde_json::from_str(SHIPPED_TABLE)?)
    }
}
