//! External inference failures. Always recovered by the heuristic fallback.

use super::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference backend unavailable: {message}")]
    Unavailable { message: String },

    #[error("inference request for {model_id} failed: {message}")]
    Request { model_id: String, message: String },

    #[error("inference for {model_id} returned {classes} classes, expected 2 or 3")]
    UnexpectedClassCount { model_id: String, classes: usize },

    #[error("inference for {model_id} returned invalid probabilities: {message}")]
    InvalidOutput { model_id: String, message: String },
}

impl ErrorCode for InferenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "INFERENCE_UNAVAILABLE",
            Self::Request { .. } => "INFERENCE_REQUEST",
            Self::UnexpectedClassCount { .. } => "INFERENCE_CLASS_COUNT",
            Self::InvalidOutput { .. } => "INFERENCE_INVALID_OUTPUT",
        }
    }
}
