//! Bootstrap engine: correlation intervals and paired MAE differences.

use std::sync::Arc;
use std::time::Instant;

use rayon::ThreadPool;
use revlens_core::config::BootstrapConfig;
use revlens_core::errors::StatsError;

use super::percentile::percentile_sorted;
use super::resample::resample_map;
use super::types::{BootstrapResult, MaeDifferenceResult};
use crate::evaluation::pearson::{mae_unchecked, pearson_r};

/// Runs resampling statistics with a fixed configuration.
///
/// Cloning shares the dedicated thread pool, if any.
#[derive(Clone)]
pub struct BootstrapEngine {
    config: BootstrapConfig,
    pool: Option<Arc<ThreadPool>>,
}

impl BootstrapEngine {
    /// Create an engine. A dedicated pool is built when `threads` is set; if
    /// that fails the global rayon pool is used.
    pub fn new(config: BootstrapConfig) -> Self {
        let pool = config.effective_threads().and_then(|threads| {
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => Some(Arc::new(pool)),
                Err(e) => {
                    tracing::warn!(threads, error = %e, "bootstrap pool unavailable, using global pool");
                    None
                }
            }
        });
        Self { config, pool }
    }

    pub fn with_defaults() -> Self {
        Self::new(BootstrapConfig::default())
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Percentile interval for Pearson r between `x` and `y`.
    ///
    /// Resamples in which either series is constant are skipped. Fails with
    /// `DegenerateResamples` when every resample is skipped.
    pub fn bootstrap_correlation_ci(&self, x: &[f64], y: &[f64]) -> Result<BootstrapResult, StatsError> {
        const STATISTIC: &str = "bootstrap_correlation_ci";
        check_lengths(STATISTIC, x.len(), y.len())?;
        let n = check_min(STATISTIC, x.len())?;

        let start = Instant::now();
        let iterations = self.config.iterations;
        let samples: Vec<f64> = resample_map(
            self.pool.as_deref(),
            iterations,
            self.config.seed,
            n,
            || (Vec::with_capacity(n), Vec::with_capacity(n)),
            |(xs, ys): &mut (Vec<f64>, Vec<f64>), indices| {
                xs.clear();
                ys.clear();
                xs.extend(indices.iter().map(|&i| x[i]));
                ys.extend(indices.iter().map(|&i| y[i]));
                pearson_r(xs, ys)
            },
        )
        .into_iter()
        .flatten()
        .collect();

        if samples.is_empty() {
            return Err(StatsError::DegenerateResamples {
                statistic: STATISTIC,
                iterations,
            });
        }

        let (ci_lower, ci_upper) = self.interval(&samples);
        tracing::debug!(
            n,
            iterations,
            successful = samples.len(),
            ci_lower,
            ci_upper,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "correlation bootstrap"
        );

        Ok(BootstrapResult {
            ci_lower,
            ci_upper,
            confidence: self.config.confidence,
            iteration_count: iterations,
            statistic_samples: samples,
        })
    }

    /// Paired bootstrap of the MAE difference between two predictors of
    /// `y_true`, drawing the same indices for both in each resample. Fails
    /// with `DegenerateResamples` when no resample was drawn.
    pub fn bootstrap_mae_difference(
        &self,
        y_true: &[f64],
        pred1: &[f64],
        pred2: &[f64],
    ) -> Result<MaeDifferenceResult, StatsError> {
        const STATISTIC: &str = "bootstrap_mae_difference";
        check_lengths(STATISTIC, y_true.len(), pred1.len())?;
        check_lengths(STATISTIC, y_true.len(), pred2.len())?;
        let n = check_min(STATISTIC, y_true.len())?;

        let start = Instant::now();
        let mae1 = mae_unchecked(y_true, pred1);
        let mae2 = mae_unchecked(y_true, pred2);
        let observed_difference = mae1 - mae2;

        let iterations = self.config.iterations;
        let samples: Vec<f64> = resample_map(
            self.pool.as_deref(),
            iterations,
            self.config.seed,
            n,
            || (),
            |_: &mut (), indices| {
                let (sum1, sum2) = indices.iter().fold((0.0, 0.0), |(s1, s2), &i| {
                    (
                        s1 + (y_true[i] - pred1[i]).abs(),
                        s2 + (y_true[i] - pred2[i]).abs(),
                    )
                });
                (sum2 - sum1) / n as f64
            },
        );

        if samples.is_empty() {
            return Err(StatsError::DegenerateResamples {
                statistic: STATISTIC,
                iterations,
            });
        }

        let threshold = observed_difference.abs();
        let extreme = samples.iter().filter(|d| d.abs() >= threshold).count();
        let p_value = extreme as f64 / samples.len() as f64;
        let mean_difference = samples.iter().sum::<f64>() / samples.len() as f64;

        let (ci_lower, ci_upper) = self.interval(&samples);
        let is_significant = ci_lower > 0.0 || ci_upper < 0.0;

        tracing::debug!(
            n,
            iterations,
            mae1,
            mae2,
            ci_lower,
            ci_upper,
            p_value,
            is_significant,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "mae difference bootstrap"
        );

        Ok(MaeDifferenceResult {
            mae1,
            mae2,
            observed_difference,
            mean_difference,
            p_value,
            ci_lower,
            ci_upper,
            confidence: self.config.confidence,
            is_significant,
            iteration_count: iterations,
            difference_samples: samples,
        })
    }

    /// `(α/2, 1 − α/2)` percentiles of non-empty `samples`.
    fn interval(&self, samples: &[f64]) -> (f64, f64) {
        let alpha = 1.0 - self.config.confidence;
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let lower = percentile_sorted(&sorted, alpha / 2.0).unwrap_or(f64::NAN);
        let upper = percentile_sorted(&sorted, 1.0 - alpha / 2.0).unwrap_or(f64::NAN);
        (lower, upper)
    }
}

fn check_lengths(statistic: &'static str, left: usize, right: usize) -> Result<(), StatsError> {
    if left != right {
        return Err(StatsError::LengthMismatch {
            statistic,
            left,
            right,
        });
    }
    Ok(())
}

fn check_min(statistic: &'static str, n: usize) -> Result<usize, StatsError> {
    if n < 2 {
        return Err(StatsError::InsufficientData {
            statistic,
            required: 2,
            actual: n,
        });
    }
    Ok(n)
}
