//! The assembled result of one analysis run.

use std::collections::BTreeMap;

use revlens_core::config::ResampleLevel;
use revlens_core::errors::{ErrorCode, StatsError};
use revlens_core::types::{BackendInfo, FacilityAggregate, ScoredReview};
use serde::{Deserialize, Serialize};

use crate::aggregation::FacilityOverview;
use crate::bootstrap::{BootstrapResult, MaeDifferenceResult};
use crate::evaluation::{BackendRanking, CorrelationMatrix, LinearFit, PerformanceMetric};
use crate::ingest::DropCounts;

/// A statistic that was either computed or could not be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricOutcome<T> {
    Computed { value: T },
    Unavailable { code: String, reason: String },
}

impl<T> MetricOutcome<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Computed { value } => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed { .. })
    }
}

impl<T> From<Result<T, StatsError>> for MetricOutcome<T> {
    fn from(result: Result<T, StatsError>) -> Self {
        match result {
            Ok(value) => Self::Computed { value },
            Err(e) => Self::Unavailable {
                code: e.error_code().to_string(),
                reason: e.to_string(),
            },
        }
    }
}

/// Dataset-level counts and averages over the ingested reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Reviews kept after validation.
    pub total_reviews: usize,
    pub input_rows: usize,
    pub dropped: DropCounts,
    pub unique_facilities: usize,
    /// Mean star rating on the 1–5 scale.
    pub avg_rating: f64,
    /// Mean raw text length in characters over all kept reviews. Reviews
    /// with missing text count as length 0 rather than being skipped.
    pub avg_review_length: f64,
    /// Review count per star rating; only ratings that occur are present.
    pub star_distribution: BTreeMap<u8, usize>,
}

/// Correlation interval for one backend against star scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendCorrelationInterval {
    pub backend_id: String,
    pub interval: MetricOutcome<BootstrapResult>,
}

/// MAE-difference bootstrap for an ordered backend pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseComparison {
    pub backend1: String,
    pub backend2: String,
    pub result: MetricOutcome<MaeDifferenceResult>,
}

/// Least-squares line of facility star score on backend score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendRegression {
    pub backend_id: String,
    pub fit: MetricOutcome<LinearFit>,
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Backends in run order; every per-backend vector follows this order.
    pub backends: Vec<BackendInfo>,
    pub resample_level: ResampleLevel,
    pub normalizer_version: u32,
    pub noise_hash_version: u32,
    pub summary: DatasetSummary,
    pub scored_reviews: Vec<ScoredReview>,
    pub facilities: Vec<FacilityAggregate>,
    pub facility_overview: Vec<FacilityOverview>,
    pub metrics: Vec<PerformanceMetric>,
    pub correlation_intervals: Vec<BackendCorrelationInterval>,
    pub pairwise: Vec<PairwiseComparison>,
    pub correlation_matrix: CorrelationMatrix,
    pub ranking: BackendRanking,
    pub regressions: Vec<BackendRegression>,
}

impl AnalysisResult {
    /// Position of a backend, matched by id or display name.
    pub fn backend_index(&self, key: &str) -> Option<usize> {
        self.backends
            .iter()
            .position(|b| b.id == key)
            .or_else(|| self.backends.iter().position(|b| b.display_name == key))
    }

    pub fn metric(&self, backend_id: &str) -> Option<&PerformanceMetric> {
        self.metrics.iter().find(|m| m.backend_id == backend_id)
    }

    pub fn comparison(&self, backend1: &str, backend2: &str) -> Option<&PairwiseComparison> {
        self.pairwise
            .iter()
            .find(|p| p.backend1 == backend1 && p.backend2 == backend2)
    }
}
