//! Bootstrap outputs.

use serde::{Deserialize, Serialize};

/// Percentile interval over the successful resamples of a statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub confidence: f64,
    /// Resamples attempted.
    pub iteration_count: usize,
    /// Statistic per successful resample, in iteration order.
    pub statistic_samples: Vec<f64>,
}

impl BootstrapResult {
    /// Resamples skipped as degenerate.
    pub fn skipped(&self) -> usize {
        self.iteration_count - self.statistic_samples.len()
    }
}

/// Paired comparison of two backends' MAE against the same reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaeDifferenceResult {
    pub mae1: f64,
    pub mae2: f64,
    /// `mae1 − mae2` on the original data.
    pub observed_difference: f64,
    /// Mean of the resampled `mae2 − mae1` values.
    pub mean_difference: f64,
    /// Fraction of resampled differences with magnitude at least
    /// `|observed_difference|`.
    pub p_value: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub confidence: f64,
    /// True iff zero lies strictly outside `[ci_lower, ci_upper]`.
    pub is_significant: bool,
    pub iteration_count: usize,
    /// Resampled `mae2 − mae1`, in iteration order.
    pub difference_samples: Vec<f64>,
}
