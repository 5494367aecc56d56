//! Packages stage outputs into an [`AnalysisResult`], deriving the
//! summary, overview, matrix, ranking and regression views.

use std::collections::BTreeMap;

use revlens_core::config::ResampleLevel;
use revlens_core::types::collections::FxHashSet;
use revlens_core::types::{BackendInfo, FacilityAggregate, ScoredReview};

use super::types::{
    AnalysisResult, BackendCorrelationInterval, BackendRegression, DatasetSummary,
    PairwiseComparison,
};
use crate::aggregation::{backend_series, facility_overview, star_series};
use crate::evaluation::{linear_fit, rank_by_mae, CorrelationMatrix, PerformanceMetric};
use crate::ingest::Dataset;
use crate::sentiment::heuristic::NOISE_HASH_VERSION;
use crate::text::NORMALIZER_VERSION;

/// Stage outputs handed to the assembler.
pub struct StageOutputs {
    pub scored_reviews: Vec<ScoredReview>,
    pub facilities: Vec<FacilityAggregate>,
    pub metrics: Vec<PerformanceMetric>,
    pub correlation_intervals: Vec<BackendCorrelationInterval>,
    pub pairwise: Vec<PairwiseComparison>,
}

pub struct ResultAssembler {
    backends: Vec<BackendInfo>,
    resample_level: ResampleLevel,
}

impl ResultAssembler {
    pub fn new(backends: Vec<BackendInfo>, resample_level: ResampleLevel) -> Self {
        Self {
            backends,
            resample_level,
        }
    }

    pub fn assemble(&self, dataset: &Dataset, outputs: StageOutputs) -> AnalysisResult {
        let summary = summarize(dataset);
        let overview = facility_overview(&outputs.facilities);
        let correlation_matrix = CorrelationMatrix::compute(&outputs.facilities, &self.backends);
        let ranking = rank_by_mae(&outputs.metrics);
        let regressions = self.regressions(&outputs.facilities);

        AnalysisResult {
            backends: self.backends.clone(),
            resample_level: self.resample_level,
            normalizer_version: NORMALIZER_VERSION,
            noise_hash_version: NOISE_HASH_VERSION,
            summary,
            scored_reviews: outputs.scored_reviews,
            facilities: outputs.facilities,
            facility_overview: overview,
            metrics: outputs.metrics,
            correlation_intervals: outputs.correlation_intervals,
            pairwise: outputs.pairwise,
            correlation_matrix,
            ranking,
            regressions,
        }
    }

    fn regressions(&self, facilities: &[FacilityAggregate]) -> Vec<BackendRegression> {
        let stars = star_series(facilities);
        self.backends
            .iter()
            .enumerate()
            .map(|(idx, info)| BackendRegression {
                backend_id: info.id.clone(),
                fit: linear_fit(&backend_series(facilities, idx), &stars).into(),
            })
            .collect()
    }
}

fn summarize(dataset: &Dataset) -> DatasetSummary {
    let reviews = &dataset.reviews;
    let n = reviews.len() as f64;

    let mut star_distribution = BTreeMap::new();
    let mut rating_sum = 0u64;
    let mut length_sum = 0usize;
    let mut facility_ids = FxHashSet::default();
    for review in reviews {
        *star_distribution.entry(review.star_rating.value()).or_insert(0) += 1;
        rating_sum += review.star_rating.value() as u64;
        length_sum += review.raw_text.chars().count();
        facility_ids.insert(review.facility_id.as_str());
    }

    DatasetSummary {
        total_reviews: reviews.len(),
        input_rows: dataset.input_rows,
        dropped: dataset.dropped,
        unique_facilities: facility_ids.len(),
        avg_rating: rating_sum as f64 / n,
        avg_review_length: length_sum as f64 / n,
        star_distribution,
    }
}
