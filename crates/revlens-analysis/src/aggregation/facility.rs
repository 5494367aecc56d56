//! Group scored reviews by facility id.

use revlens_core::errors::StatsError;
use revlens_core::types::collections::FxHashMap;
use revlens_core::types::{FacilityAggregate, ScoreVec, ScoredReview};
use serde::{Deserialize, Serialize};

#[derive(Default)]
struct Accumulator {
    count: usize,
    star_sum: f64,
    backend_sums: ScoreVec,
}

/// Mean star score and mean backend scores per facility.
///
/// Facilities appear in the order their first review appears. Every
/// review must carry `backend_count` scores.
pub fn aggregate(
    scored: &[ScoredReview],
    backend_count: usize,
) -> Result<Vec<FacilityAggregate>, StatsError> {
    if scored.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let mut order: Vec<&str> = Vec::new();
    let mut groups: FxHashMap<&str, Accumulator> = FxHashMap::default();

    for review in scored {
        if review.backend_scores.len() != backend_count {
            return Err(StatsError::LengthMismatch {
                statistic: "aggregate",
                left: review.backend_scores.len(),
                right: backend_count,
            });
        }
        let acc = groups.entry(review.facility_id()).or_insert_with(|| {
            order.push(review.facility_id());
            Accumulator {
                backend_sums: ScoreVec::from_elem(0.0, backend_count),
                ..Accumulator::default()
            }
        });
        acc.count += 1;
        acc.star_sum += review.star_score as f64;
        for (sum, score) in acc.backend_sums.iter_mut().zip(&review.backend_scores) {
            *sum += score;
        }
    }

    let aggregates = order
        .into_iter()
        .filter_map(|id| {
            let acc = groups.remove(id)?;
            let n = acc.count as f64;
            Some(FacilityAggregate {
                facility_id: id.to_string(),
                review_count: acc.count,
                mean_star_score: acc.star_sum / n,
                mean_backend_scores: acc.backend_sums.iter().map(|s| s / n).collect(),
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(facilities = aggregates.len(), reviews = scored.len(), "aggregated");
    Ok(aggregates)
}

/// Display-oriented facility summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityOverview {
    pub facility_id: String,
    pub review_count: usize,
    /// Mean star rating on the 1–5 scale.
    pub avg_rating: f64,
    /// Mean of the per-backend mean scores. Backend columns only; the
    /// reference star score is not averaged in.
    pub avg_sentiment: f64,
}

pub fn facility_overview(aggregates: &[FacilityAggregate]) -> Vec<FacilityOverview> {
    aggregates
        .iter()
        .map(|agg| {
            let backends = agg.mean_backend_scores.len();
            let avg_sentiment = if backends == 0 {
                f64::NAN
            } else {
                agg.mean_backend_scores.iter().sum::<f64>() / backends as f64
            };
            FacilityOverview {
                facility_id: agg.facility_id.clone(),
                review_count: agg.review_count,
                avg_rating: agg.mean_star_score + 3.0,
                avg_sentiment,
            }
        })
        .collect()
}
