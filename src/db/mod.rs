//! Database layer (in-process tables).

pub mod memory;

pub use memory::{MemoryDb, ReportOutcome};
