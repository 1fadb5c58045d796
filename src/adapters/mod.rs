//! Adapters (infrastructure implementations) for domain ports.

pub mod embedded;
pub mod in_memory;
pub mod json_file;

pub use embedded::EmbeddedTable;
pub use in_memory::InMemoryTable;
pub use json_file::JsonFileTable;
