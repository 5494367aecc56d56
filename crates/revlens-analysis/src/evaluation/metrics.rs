//! Per-backend performance metrics over facility aggregates.

use revlens_core::errors::StatsError;
use revlens_core::types::{BackendInfo, FacilityAggregate};
use serde::{Deserialize, Serialize};

use super::pearson::{mean_absolute_error, pearson, Correlation};
use crate::aggregation::{backend_series, star_series};

/// Why a metric is NaN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricIssue {
    /// One of the paired series has zero variance.
    ConstantSeries,
    InsufficientData { required: usize, actual: usize },
    LengthMismatch { left: usize, right: usize },
}

/// Agreement of one backend with star ratings at facility level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub backend_id: String,
    pub display_name: String,
    /// Pearson r in [-1, 1], or NaN.
    pub correlation: f64,
    /// Two-sided p-value in [0, 1], or NaN.
    pub p_value: f64,
    pub mae: f64,
    /// Set when `correlation` is NaN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<MetricIssue>,
}

/// Computes [`PerformanceMetric`]s. Never fails: unavailable statistics are
/// reported as NaN with an issue.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceEvaluator;

impl PerformanceEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// One metric per backend, in backend order.
    pub fn evaluate(
        &self,
        aggregates: &[FacilityAggregate],
        backends: &[BackendInfo],
    ) -> Vec<PerformanceMetric> {
        let stars = star_series(aggregates);
        backends
            .iter()
            .enumerate()
            .map(|(idx, info)| {
                let scores = backend_series(aggregates, idx);
                let metric = self.evaluate_series(info, &stars, &scores);
                tracing::debug!(
                    backend = %info.id,
                    correlation = metric.correlation,
                    p_value = metric.p_value,
                    mae = metric.mae,
                    "evaluated backend"
                );
                metric
            })
            .collect()
    }

    /// Metric for one backend from paired star and backend series.
    pub fn evaluate_series(
        &self,
        info: &BackendInfo,
        stars: &[f64],
        scores: &[f64],
    ) -> PerformanceMetric {
        let (correlation, issue) = match pearson(stars, scores) {
            Ok(c) if c.is_defined() => (c, None),
            Ok(c) => (c, Some(MetricIssue::ConstantSeries)),
            Err(StatsError::InsufficientData {
                required, actual, ..
            }) => (
                Correlation::UNDEFINED,
                Some(MetricIssue::InsufficientData { required, actual }),
            ),
            Err(StatsError::LengthMismatch { left, right, .. }) => (
                Correlation::UNDEFINED,
                Some(MetricIssue::LengthMismatch { left, right }),
            ),
            Err(e) => {
                tracing::warn!(backend = %info.id, error = %e, "correlation unavailable");
                (Correlation::UNDEFINED, None)
            }
        };

        PerformanceMetric {
            backend_id: info.id.clone(),
            display_name: info.display_name.clone(),
            correlation: correlation.r,
            p_value: correlation.p_value,
            mae: mean_absolute_error(stars, scores).unwrap_or(f64::NAN),
            issue,
        }
    }
}
