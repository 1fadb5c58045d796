//! In-memory table source for testing.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::{Error, Result, ports::TableSource, wizard::TableRecord};

/// In-memory table source.
///
/// Hands out a fixed record list, or a fixed failure, without touching the
/// file system. Clones share a fetch counter so tests can check how often the
/// engine went back to the source.
#[derive(Debug, Clone)]
pub struct InMemoryTable {
    records: std::result::Result<Vec<TableRecord>, String>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryTable {
    pub fn new(records: Vec<TableRecord>) -> Self {
        Self {
            records: Ok(records),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose every fetch fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Err(message.into()),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `fetch` calls made so far, across all clones
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl TableSource for InMemoryTable {
    fn name(&self) -> String {
        "in-memory table".to_string()
    }

    fn fetch(&self) -> Result<Vec<TableRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.records.clone().map_err(|message| Error::TableSource {
            source_name: self.name(),
            message,
        })
    }
}
