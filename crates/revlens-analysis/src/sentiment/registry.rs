//! Backend registry: maps configured backends to scorer implementations.
//!
//! Call sites only see `(BackendInfo, Arc<dyn SentimentScorer>)` pairs, so
//! adding a backend kind touches this file and nothing downstream.

use std::sync::Arc;

use revlens_core::config::{BackendKind, InferenceConfig, ScoringConfig};
use revlens_core::traits::{InferenceBackend, SentimentScorer, UnavailableInference};
use revlens_core::types::collections::FxHashMap;
use revlens_core::types::{BackendInfo, SentimentDistribution};

use super::heuristic::HeuristicScorer;
use super::model::ModelScorer;

/// A registered backend and the scorer serving it.
#[derive(Clone)]
pub struct RegisteredBackend {
    pub info: BackendInfo,
    pub scorer: Arc<dyn SentimentScorer>,
}

/// The ordered set of backends taking part in a run.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    backends: Vec<RegisteredBackend>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration. Heuristic backends share one scorer;
    /// model backends share one model scorer over `inference`.
    pub fn from_config(
        scoring: &ScoringConfig,
        inference: Arc<dyn InferenceBackend>,
        max_tokens: usize,
    ) -> Self {
        let heuristic_scorer = HeuristicScorer::from_backends(&scoring.backends);

        let model_ids: FxHashMap<String, String> = scoring
            .backends
            .iter()
            .filter(|b| b.kind == BackendKind::Model)
            .map(|b| (b.id.clone(), b.model_id().to_string()))
            .collect();

        let model: Option<Arc<dyn SentimentScorer>> = if model_ids.is_empty() {
            None
        } else {
            let fallback = heuristic_scorer.clone();
            Some(Arc::new(ModelScorer::new(inference, fallback, model_ids, max_tokens)))
        };
        let heuristic: Arc<dyn SentimentScorer> = Arc::new(heuristic_scorer);

        let mut registry = Self::new();
        for backend in &scoring.backends {
            let scorer = match (backend.kind, &model) {
                (BackendKind::Model, Some(model)) => Arc::clone(model),
                _ => Arc::clone(&heuristic),
            };
            registry.register(
                BackendInfo {
                    id: backend.id.clone(),
                    display_name: backend.display_name.clone(),
                },
                scorer,
            );
        }
        registry
    }

    /// Append a backend. Order of registration is the result order.
    pub fn register(&mut self, info: BackendInfo, scorer: Arc<dyn SentimentScorer>) {
        self.backends.push(RegisteredBackend { info, scorer });
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    pub fn backends(&self) -> &[RegisteredBackend] {
        &self.backends
    }

    pub fn infos(&self) -> Vec<BackendInfo> {
        self.backends.iter().map(|b| b.info.clone()).collect()
    }

    /// Score normalized text with the backend at `index`.
    pub fn score(&self, index: usize, normalized_text: &str) -> SentimentDistribution {
        let backend = &self.backends[index];
        backend.scorer.score(normalized_text, &backend.info.id)
    }
}

/// Select the inference capability for the configuration.
///
/// With the `http-inference` feature and an endpoint set this is the HTTP
/// client; otherwise every model backend falls back to the heuristic.
pub fn inference_from_config(config: &InferenceConfig) -> Arc<dyn InferenceBackend> {
    http_inference(config).unwrap_or_else(|| Arc::new(UnavailableInference))
}

#[cfg(feature = "http-inference")]
fn http_inference(config: &InferenceConfig) -> Option<Arc<dyn InferenceBackend>> {
    config.endpoint.as_ref()?;
    match super::http::HttpInferenceBackend::from_config(config) {
        Ok(backend) => Some(Arc::new(backend)),
        Err(e) => {
            tracing::warn!(error = %e, "inference endpoint unusable");
            None
        }
    }
}

#[cfg(not(feature = "http-inference"))]
fn http_inference(config: &InferenceConfig) -> Option<Arc<dyn InferenceBackend>> {
    if config.endpoint.is_some() {
        tracing::warn!("inference.endpoint is set but the http-inference feature is disabled");
    }
    None
}
