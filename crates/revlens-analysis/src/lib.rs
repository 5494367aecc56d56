//! # revlens-analysis
//!
//! Scoring-and-evaluation pipeline for the revlens review analyzer.
//! Normalizes review text, scores it with pluggable sentiment backends,
//! aggregates per facility, and compares each backend against star ratings
//! with correlation, error, and bootstrap statistics.

#![allow(clippy::module_inception)]

pub mod aggregation;
pub mod bootstrap;
pub mod evaluation;
pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod scoring;
pub mod sentiment;
pub mod session;
pub mod text;

pub use pipeline::{AnalysisPipeline, AnalysisResult};
pub use session::AnalysisSession;
