//! Paired series views over facility aggregates.

use revlens_core::types::FacilityAggregate;

/// Mean star score per facility, in aggregate order.
pub fn star_series(aggregates: &[FacilityAggregate]) -> Vec<f64> {
    aggregates.iter().map(|a| a.mean_star_score).collect()
}

/// Mean score of backend `index` per facility, in aggregate order.
pub fn backend_series(aggregates: &[FacilityAggregate], index: usize) -> Vec<f64> {
    aggregates
        .iter()
        .map(|a| a.mean_backend_scores[index])
        .collect()
}
