//! Blocking client for a hosted text-classification endpoint.
//!
//! Posts `{"inputs": text, "parameters": {...}}` to `<endpoint>/models/<model_id>`
//! and reorders the returned `(label, score)` pairs into
//! `[negative, (neutral,) positive]`.

use std::time::Duration;

use revlens_core::config::InferenceConfig;
use revlens_core::errors::InferenceError;
use revlens_core::traits::InferenceBackend;
use serde::Deserialize;

pub struct HttpInferenceBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: Option<String>,
    max_tokens: usize,
}

impl HttpInferenceBackend {
    /// Build a client from config. Fails when no endpoint is configured.
    pub fn from_config(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or_else(|| InferenceError::Unavailable {
                message: "inference.endpoint is not set".to_string(),
            })?
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::Unavailable {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        let token = config
            .api_token_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok());

        Ok(Self {
            client,
            endpoint,
            token,
            max_tokens: config.max_tokens,
        })
    }
}

impl InferenceBackend for HttpInferenceBackend {
    fn infer(&self, text: &str, model_id: &str) -> Result<Vec<f64>, InferenceError> {
        let url = format!("{}/models/{}", self.endpoint, model_id);
        let body = serde_json::json!({
            "inputs": text,
            "parameters": {
                "truncation": true,
                "padding": "max_length",
                "max_length": self.max_tokens,
                "top_k": null,
            },
            "options": { "wait_for_model": true },
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let request_err = |message: String| InferenceError::Request {
            model_id: model_id.to_string(),
            message,
        };

        let response = request.send().map_err(|e| request_err(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(request_err(format!("HTTP {status}")));
        }
        let parsed: ClassificationResponse =
            response.json().map_err(|e| request_err(e.to_string()))?;

        order_by_label(model_id, parsed.into_scores())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            Self::Nested(mut batches) if !batches.is_empty() => batches.swap_remove(0),
            Self::Nested(_) => Vec::new(),
            Self::Flat(scores) => scores,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelKey {
    Named(u8),
    Indexed(usize),
}

fn label_key(label: &str) -> Option<LabelKey> {
    let lower = label.to_ascii_lowercase();
    if lower.starts_with("neg") {
        Some(LabelKey::Named(0))
    } else if lower.starts_with("neu") {
        Some(LabelKey::Named(1))
    } else if lower.starts_with("pos") {
        Some(LabelKey::Named(2))
    } else {
        lower
            .strip_prefix("label_")
            .and_then(|n| n.parse().ok())
            .map(LabelKey::Indexed)
    }
}

/// Order scores as `[negative, (neutral,) positive]`.
///
/// Accepts either named labels (`negative`/`neutral`/`positive`) or
/// positional `LABEL_k` labels, which are taken in index order.
fn order_by_label(model_id: &str, scores: Vec<LabelScore>) -> Result<Vec<f64>, InferenceError> {
    let invalid = |message: String| InferenceError::InvalidOutput {
        model_id: model_id.to_string(),
        message,
    };

    let mut keyed = Vec::with_capacity(scores.len());
    for s in scores {
        let key = label_key(&s.label).ok_or_else(|| invalid(format!("unknown label {:?}", s.label)))?;
        keyed.push((key, s.score));
    }

    let all_named = keyed.iter().all(|(k, _)| matches!(k, LabelKey::Named(_)));
    let all_indexed = keyed.iter().all(|(k, _)| matches!(k, LabelKey::Indexed(_)));
    if !all_named && !all_indexed {
        return Err(invalid("mixed named and positional labels".to_string()));
    }

    keyed.sort_by_key(|(k, _)| match k {
        LabelKey::Named(i) => *i as usize,
        LabelKey::Indexed(i) => *i,
    });
    keyed.dedup_by_key(|(k, _)| *k);

    if all_named && keyed.len() == 2 && keyed.iter().any(|(k, _)| *k == LabelKey::Named(1)) {
        return Err(invalid("two-class output must be negative/positive".to_string()));
    }

    Ok(keyed.into_iter().map(|(_, score)| score).collect())
}
