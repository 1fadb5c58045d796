//! CLI command implementations

pub mod analyze;
pub mod pick;
pub mod table;
