//! Model-backed scorer.
//!
//! Delegates to an [`InferenceBackend`]. Any inference failure falls back to
//! the heuristic scorer for that single call and is only logged.

use std::sync::Arc;

use revlens_core::errors::InferenceError;
use revlens_core::traits::{InferenceBackend, SentimentScorer};
use revlens_core::types::collections::FxHashMap;
use revlens_core::types::SentimentDistribution;

use super::heuristic::HeuristicScorer;

pub struct ModelScorer {
    inference: Arc<dyn InferenceBackend>,
    fallback: HeuristicScorer,
    /// backend id → model id sent to the inference endpoint.
    model_ids: FxHashMap<String, String>,
    max_tokens: usize,
}

impl ModelScorer {
    pub fn new(
        inference: Arc<dyn InferenceBackend>,
        fallback: HeuristicScorer,
        model_ids: FxHashMap<String, String>,
        max_tokens: usize,
    ) -> Self {
        Self {
            inference,
            fallback,
            model_ids,
            max_tokens,
        }
    }

    fn model_id<'a>(&'a self, backend_id: &'a str) -> &'a str {
        self.model_ids
            .get(backend_id)
            .map(String::as_str)
            .unwrap_or(backend_id)
    }

    fn infer(&self, text: &str, model_id: &str) -> Result<SentimentDistribution, InferenceError> {
        let input = truncate_tokens(text, self.max_tokens);
        let probs = self.inference.infer(input, model_id)?;
        distribution_from_probabilities(model_id, &probs)
    }
}

impl SentimentScorer for ModelScorer {
    fn score(&self, normalized_text: &str, backend_id: &str) -> SentimentDistribution {
        if normalized_text.is_empty() {
            return SentimentDistribution::UNDECIDED;
        }

        let model_id = self.model_id(backend_id);
        match self.infer(normalized_text, model_id) {
            Ok(dist) => dist,
            Err(e) => {
                tracing::warn!(
                    backend = backend_id,
                    model = model_id,
                    error = %e,
                    "inference failed, using heuristic fallback"
                );
                self.fallback.score(normalized_text, backend_id)
            }
        }
    }

    fn name(&self) -> &'static str {
        "model"
    }
}

/// Keep at most `max_tokens` tokens, treating each whitespace-separated ASCII
/// word and each other non-space character as one token.
///
/// A coarse stand-in for a subword tokenizer: Japanese text tokenizes at
/// roughly one token per character. The endpoint truncates exactly.
pub fn truncate_tokens(text: &str, max_tokens: usize) -> &str {
    let mut tokens = 0;
    let mut in_word = false;
    for (idx, c) in text.char_indices() {
        if c.is_whitespace() {
            in_word = false;
            continue;
        }
        let starts_token = if c.is_ascii_alphanumeric() {
            let start = !in_word;
            in_word = true;
            start
        } else {
            in_word = false;
            true
        };
        if starts_token {
            if tokens == max_tokens {
                return text[..idx].trim_end();
            }
            tokens += 1;
        }
    }
    text
}

/// Interpret a `[negative, positive]` or `[negative, neutral, positive]`
/// probability vector.
pub fn distribution_from_probabilities(
    model_id: &str,
    probs: &[f64],
) -> Result<SentimentDistribution, InferenceError> {
    if probs.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(InferenceError::InvalidOutput {
            model_id: model_id.to_string(),
            message: format!("non-finite or negative probability in {probs:?}"),
        });
    }
    let sum: f64 = probs.iter().sum();
    if sum <= 0.0 {
        return Err(InferenceError::InvalidOutput {
            model_id: model_id.to_string(),
            message: "probabilities sum to zero".to_string(),
        });
    }
    let scale = 1.0 / sum;

    match probs {
        &[negative, positive] => Ok(SentimentDistribution::binary(
            positive * scale,
            negative * scale,
        )),
        &[negative, neutral, positive] => Ok(SentimentDistribution {
            positive: positive * scale,
            negative: negative * scale,
            neutral: Some(neutral * scale),
        }),
        _ => Err(InferenceError::UnexpectedClassCount {
            model_id: model_id.to_string(),
            classes: probs.len(),
        }),
    }
}
