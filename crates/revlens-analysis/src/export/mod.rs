//! Tabular export of analysis results.

pub mod csv;

pub use self::csv::{export_facilities, export_scored_reviews};
