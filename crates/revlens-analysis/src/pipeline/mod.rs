//! End-to-end analysis pipeline.
//!
//! ingest → normalize + score → aggregate → evaluate → bootstrap → assemble.
//! Validation failures abort before scoring; statistical failures are
//! recorded per metric.

pub mod assembler;
pub mod types;

use std::time::Instant;

use revlens_core::config::{ResampleLevel, RevlensConfig};
use revlens_core::errors::{AnalysisError, SessionError};
use revlens_core::types::{FacilityAggregate, ScoredReview};

pub use assembler::{ResultAssembler, StageOutputs};
pub use types::{
    AnalysisResult, BackendCorrelationInterval, BackendRegression, DatasetSummary,
    MetricOutcome, PairwiseComparison,
};

use crate::aggregation::{aggregate, backend_series, star_series};
use crate::bootstrap::{BootstrapEngine, MaeDifferenceResult};
use crate::evaluation::PerformanceEvaluator;
use crate::ingest::{ingest, Dataset, RawTable};
use crate::scoring::score_reviews;
use crate::sentiment::{inference_from_config, BackendRegistry};

/// Reference and per-backend series at the configured resampling level.
struct LevelSeries {
    stars: Vec<f64>,
    backends: Vec<Vec<f64>>,
}

impl LevelSeries {
    fn build(
        level: ResampleLevel,
        scored: &[ScoredReview],
        facilities: &[FacilityAggregate],
        backend_count: usize,
    ) -> Self {
        match level {
            ResampleLevel::Facility => Self {
                stars: star_series(facilities),
                backends: (0..backend_count)
                    .map(|idx| backend_series(facilities, idx))
                    .collect(),
            },
            ResampleLevel::Review => Self {
                stars: scored.iter().map(|s| s.star_score as f64).collect(),
                backends: (0..backend_count)
                    .map(|idx| scored.iter().map(|s| s.backend_scores[idx]).collect())
                    .collect(),
            },
        }
    }
}

/// A configured pipeline. Stateless between runs.
pub struct AnalysisPipeline {
    config: RevlensConfig,
    registry: BackendRegistry,
    evaluator: PerformanceEvaluator,
    bootstrap: BootstrapEngine,
}

impl AnalysisPipeline {
    pub fn new(config: RevlensConfig, registry: BackendRegistry) -> Self {
        let bootstrap = BootstrapEngine::new(config.bootstrap.clone());
        Self {
            config,
            registry,
            evaluator: PerformanceEvaluator::new(),
            bootstrap,
        }
    }

    /// Build the backend registry from `config` as well.
    pub fn from_config(config: RevlensConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let inference = inference_from_config(&config.inference);
        let registry =
            BackendRegistry::from_config(&config.scoring, inference, config.inference.max_tokens);
        Ok(Self::new(config, registry))
    }

    pub fn config(&self) -> &RevlensConfig {
        &self.config
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Validate `table` and run the full analysis.
    pub fn run_analysis(&self, table: &RawTable) -> Result<AnalysisResult, AnalysisError> {
        let start = Instant::now();
        let dataset = ingest(table, &self.config.ingest)?;
        tracing::info!(
            rows = dataset.input_rows,
            kept = dataset.reviews.len(),
            dropped = dataset.dropped.total(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "ingested dataset"
        );
        self.run_dataset(&dataset)
    }

    /// Run the analysis on an already validated dataset.
    pub fn run_dataset(&self, dataset: &Dataset) -> Result<AnalysisResult, AnalysisError> {
        let start = Instant::now();
        let backends = self.registry.infos();
        let level = self.config.bootstrap.level;

        let scored = score_reviews(&dataset.reviews, &self.registry);

        let facilities = aggregate(&scored, backends.len())?;
        tracing::info!(facilities = facilities.len(), "aggregated by facility");

        let metrics = self.evaluator.evaluate(&facilities, &backends);

        let stage = Instant::now();
        let series = LevelSeries::build(level, &scored, &facilities, backends.len());

        let correlation_intervals = backends
            .iter()
            .zip(&series.backends)
            .map(|(info, scores)| BackendCorrelationInterval {
                backend_id: info.id.clone(),
                interval: self
                    .bootstrap
                    .bootstrap_correlation_ci(scores, &series.stars)
                    .into(),
            })
            .collect();

        let mut pairwise = Vec::new();
        for i in 0..backends.len() {
            for j in (i + 1)..backends.len() {
                let result = self.bootstrap.bootstrap_mae_difference(
                    &series.stars,
                    &series.backends[i],
                    &series.backends[j],
                );
                pairwise.push(PairwiseComparison {
                    backend1: backends[i].id.clone(),
                    backend2: backends[j].id.clone(),
                    result: result.into(),
                });
            }
        }
        tracing::info!(
            level = ?level,
            iterations = self.config.bootstrap.iterations,
            pairs = pairwise.len(),
            elapsed_ms = stage.elapsed().as_millis() as u64,
            "bootstrap complete"
        );

        let assembler = ResultAssembler::new(backends, level);
        let result = assembler.assemble(
            dataset,
            StageOutputs {
                scored_reviews: scored,
                facilities,
                metrics,
                correlation_intervals,
                pairwise,
            },
        );

        tracing::info!(
            reviews = result.summary.total_reviews,
            facilities = result.facilities.len(),
            best = result.ranking.best().unwrap_or("-"),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "analysis complete"
        );
        Ok(result)
    }

    /// MAE-difference bootstrap between two backends of a finished result,
    /// by position in `result.backends`.
    pub(crate) fn compare(
        &self,
        result: &AnalysisResult,
        first: usize,
        second: usize,
    ) -> Result<MaeDifferenceResult, AnalysisError> {
        let series = LevelSeries::build(
            result.resample_level,
            &result.scored_reviews,
            &result.facilities,
            result.backends.len(),
        );
        let backend = |idx: usize| {
            series
                .backends
                .get(idx)
                .ok_or_else(|| SessionError::UnknownBackend {
                    backend_id: format!("#{idx}"),
                })
        };
        let (pred1, pred2) = (backend(first)?, backend(second)?);
        Ok(self
            .bootstrap
            .bootstrap_mae_difference(&series.stars, pred1, pred2)?)
    }
}
