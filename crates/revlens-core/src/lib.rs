//! # revlens-core
//!
//! Core types, traits, errors, configuration, and tracing setup shared by the
//! revlens review-analysis crates.

#![allow(clippy::module_inception)]

pub mod config;
pub mod errors;
pub mod logging;
pub mod traits;
pub mod types;

pub use config::RevlensConfig;
pub use errors::AnalysisError;
