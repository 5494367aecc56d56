//! Shared traits used across revlens crates.

pub mod inference;
pub mod scorer;

pub use inference::{InferenceBackend, UnavailableInference};
pub use scorer::SentimentScorer;
