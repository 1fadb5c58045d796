//! Ports (trait boundaries) for external dependencies.
//!
//! The engine core performs no I/O. Where the line value table comes from is
//! decided by an adapter implementing `TableSource`.

pub mod table_source;

pub use table_source::TableSource;
