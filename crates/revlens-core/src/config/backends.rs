//! Backend declarations for the scoring stage.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Which scorer implementation serves a backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Keyword heuristic, always available.
    #[default]
    Heuristic,
    /// External model inference with heuristic fallback.
    Model,
}

/// One sentiment backend taking part in the comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Stable backend identifier. Also feeds the heuristic noise hash.
    pub id: String,
    /// Human-readable name used in reports and export headers.
    pub display_name: String,
    #[serde(default)]
    pub kind: BackendKind,
    /// Fixed offset applied by the heuristic scorer to tell backends apart.
    #[serde(default)]
    pub bias: f64,
    /// Model identifier sent to the inference endpoint. Defaults to `id`.
    #[serde(default)]
    pub model_id: Option<String>,
}

impl BackendConfig {
    pub fn heuristic(id: &str, display_name: &str, bias: f64) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            kind: BackendKind::Heuristic,
            bias,
            model_id: None,
        }
    }

    pub fn model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(&self.id)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scoring.backends.id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.display_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("scoring.backends[{}].display_name", self.id),
                message: "must not be empty".to_string(),
            });
        }
        if !self.bias.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: format!("scoring.backends[{}].bias", self.id),
                message: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}

/// The three stock Japanese sentiment backends, all served heuristically.
pub fn default_backends() -> Vec<BackendConfig> {
    vec![
        BackendConfig::heuristic(
            "koheiduck/bert-japanese-finetuned-sentiment",
            "Model A (Koheiduck)",
            0.0,
        ),
        BackendConfig::heuristic(
            "llm-book/bert-base-japanese-v2-finetuned-sentiment",
            "Model B (LLM-book)",
            0.1,
        ),
        BackendConfig::heuristic(
            "Mizuiro-inc/bert-base-japanese-finetuned-sentiment-analysis",
            "Model C (Mizuiro)",
            -0.05,
        ),
    ]
}
