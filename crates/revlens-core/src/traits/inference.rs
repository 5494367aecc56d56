//! External sentiment inference. Untrusted and fallible.

use crate::errors::InferenceError;

/// Returns a probability vector over `[negative, positive]` or
/// `[negative, neutral, positive]` for the given text.
pub trait InferenceBackend: Send + Sync {
    fn infer(&self, text: &str, model_id: &str) -> Result<Vec<f64>, InferenceError>;
}

/// Placeholder used when no inference endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableInference;

impl InferenceBackend for UnavailableInference {
    fn infer(&self, _text: &str, model_id: &str) -> Result<Vec<f64>, InferenceError> {
        Err(InferenceError::Unavailable {
            message: format!("no inference endpoint configured for {model_id}"),
        })
    }
}
