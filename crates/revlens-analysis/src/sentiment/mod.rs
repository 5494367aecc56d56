//! Sentiment backends.
//!
//! - `heuristic`: keyword scorer with deterministic per-backend noise
//! - `model`: external inference with per-call heuristic fallback
//! - `http`: text-classification endpoint client (`http-inference` feature)
//! - `registry`: builds the configured backend set

pub mod heuristic;
pub mod keywords;
pub mod model;
pub mod registry;

#[cfg(feature = "http-inference")]
pub mod http;

pub use heuristic::HeuristicScorer;
pub use model::ModelScorer;
pub use registry::{inference_from_config, BackendRegistry};
