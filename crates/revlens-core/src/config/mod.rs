//! Configuration for an analysis run, loaded from `revlens.toml`.
//!
//! Every section has defaults, so an empty file (or no file) yields a working
//! configuration with the three stock backends.

mod backends;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use backends::{default_backends, BackendConfig, BackendKind};

/// File name looked up under the project root.
pub const CONFIG_FILE_NAME: &str = "revlens.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevlensConfig {
    pub ingest: IngestConfig,
    pub scoring: ScoringConfig,
    pub bootstrap: BootstrapConfig,
    pub inference: InferenceConfig,
}

impl RevlensConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `override_path` if given, else `<root>/revlens.toml`.
    ///
    /// A missing default file yields the default configuration; a missing
    /// override file is an error.
    pub fn load(root: &Path, override_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match override_path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = root.join(CONFIG_FILE_NAME);
                if !p.exists() {
                    tracing::debug!(path = %p.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                p
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ingest.validate()?;
        self.scoring.validate()?;
        self.bootstrap.validate()?;
        self.inference.validate()?;
        Ok(())
    }
}

/// Ingestion limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Maximum raw row count accepted for a single run.
    pub max_rows: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { max_rows: 10_000 }
    }
}

impl IngestConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rows == 0 {
            return Err(invalid("ingest.max_rows", "must be at least 1"));
        }
        Ok(())
    }
}

/// Which sentiment backends take part in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub backends: Vec<BackendConfig>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            backends: default_backends(),
        }
    }
}

impl ScoringConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.backends.is_empty() {
            return Err(invalid("scoring.backends", "at least one backend is required"));
        }
        for (i, backend) in self.backends.iter().enumerate() {
            backend.validate()?;
            let duplicate = self.backends[..i]
                .iter()
                .any(|b| b.id == backend.id || b.display_name == backend.display_name);
            if duplicate {
                return Err(invalid(
                    "scoring.backends",
                    &format!("duplicate backend id or display name: {}", backend.id),
                ));
            }
        }
        Ok(())
    }

    /// Look up a backend by id.
    pub fn backend(&self, id: &str) -> Option<&BackendConfig> {
        self.backends.iter().find(|b| b.id == id)
    }
}

/// Resampling granularity for bootstrap statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleLevel {
    /// Resample facility aggregates (the granularity of the reported metrics).
    #[default]
    Facility,
    /// Resample individual scored reviews.
    Review,
}

/// Bootstrap engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of resamples per statistic.
    pub iterations: usize,
    /// Confidence level of the percentile interval, in (0, 1).
    pub confidence: f64,
    /// Base seed; each iteration derives its own stream from it.
    pub seed: u64,
    pub level: ResampleLevel,
    /// Worker threads for resampling. `None` or 0 uses the global rayon pool.
    pub threads: Option<usize>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            confidence: 0.95,
            seed: 42,
            level: ResampleLevel::Facility,
            threads: None,
        }
    }
}

impl BootstrapConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(invalid("bootstrap.iterations", "must be at least 1"));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(invalid("bootstrap.confidence", "must lie strictly between 0 and 1"));
        }
        Ok(())
    }

    /// Thread count for a dedicated pool, or `None` for the global pool.
    pub fn effective_threads(&self) -> Option<usize> {
        self.threads.filter(|&t| t > 0)
    }
}

/// External inference capability used by model-backed backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL of a text-classification endpoint. `None` disables inference.
    pub endpoint: Option<String>,
    /// Name of the environment variable holding a bearer token, if any.
    pub api_token_env: Option<String>,
    pub timeout_ms: u64,
    /// Inputs are truncated to this many tokens before inference.
    pub max_tokens: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_token_env: None,
            timeout_ms: 30_000,
            max_tokens: 512,
        }
    }
}

impl InferenceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(invalid("inference.max_tokens", "must be at least 1"));
        }
        if self.timeout_ms == 0 {
            return Err(invalid("inference.timeout_ms", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
