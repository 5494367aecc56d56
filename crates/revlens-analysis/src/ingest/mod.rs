//! Tabular input and ingestion-time validation.

pub mod table;
pub mod validate;

pub use table::RawTable;
pub use validate::{ingest, Dataset, DropCounts};
