//! Error taxonomy for the analysis pipeline.
//!
//! Validation errors fail fast at ingestion. Statistical errors are reported
//! per metric and never abort a run. Inference errors are recovered locally by
//! the heuristic fallback and never reach the caller.

pub mod config;
pub mod export;
pub mod inference;
pub mod session;
pub mod stats;
pub mod validation;

pub use config::ConfigError;
pub use export::ExportError;
pub use inference::InferenceError;
pub use session::SessionError;
pub use stats::StatsError;
pub use validation::ValidationError;

/// Stable, machine-readable error codes.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

/// Umbrella error for a full analysis run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Stats(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Export(e) => e.error_code(),
            Self::Session(e) => e.error_code(),
        }
    }
}
