//! JSON file implementation of the table source port.

use std::{
    fs::File,
    io::BufReader,
    path::PathBuf,
};

use crate::{Error, Result, ports::TableSource, wizard::TableRecord};

/// Table source reading a JSON record array from disk.
///
/// # Examples
///
/// ```no_run
/// use piscari::adapters::JsonFileTable;
/// use piscari::wizard::StateValueTable;
///
/// let mut table = StateValueTable::new();
/// table.load(&JsonFileTable::new("assets/line_values.json"))?;
/// # Ok::<(), piscari::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileTable {
    path: PathBuf,
}

impl JsonFileTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for JsonFileTable {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<TableRecord>> {
        let file = File::open(&self.path).map_err(|source| Error::Io {
            operation: format!("open line value table {:?}", self.path),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::TableSource {
            source_name: self.name(),
            message: e.to_string(),
        })
    }
}
