//! Table source port for the precomputed line value table.

use crate::{Result, wizard::TableRecord};

/// Port for fetching the raw records of the line value table.
///
/// The table is read once at engine startup; implementations may read a
/// file, use data compiled into the binary, or hand out fixtures in tests.
///
/// # Examples
///
/// ```
/// use piscari::adapters::InMemoryTable;
/// use piscari::ports::TableSource;
/// use piscari::wizard::TableRecord;
///
/// let source = InMemoryTable::new(vec![TableRecord::new(0, 0, 0)]);
/// assert_eq!(source.fetch()?.len(), 1);
/// # Ok::<(), piscari::Error>(())
/// ```
pub trait TableSource {
    /// Human-readable origin of the records, used in logs and errors.
    fn name(&self) -> String;

    /// Fetch every record of the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying document cannot be read or is not a
    /// well-formed record array. Semantic checks (state ids, duplicates) are
    /// left to `StateValueTable`.
    fn fetch(&self) -> Result<Vec<TableRecord>>;
}
