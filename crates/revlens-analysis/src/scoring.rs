//! Review scoring: distributions to signed scalar scores.

use std::time::Instant;

use rayon::prelude::*;
use revlens_core::types::{Review, ScoreVec, ScoredReview, SentimentDistribution, StarRating};

use crate::sentiment::BackendRegistry;
use crate::text::normalize;

/// `2·positive − 2·negative`, in [-2, 2].
pub fn review_score(distribution: &SentimentDistribution) -> f64 {
    2.0 * distribution.positive - 2.0 * distribution.negative
}

/// `rating − 3`, in {-2, …, 2}.
pub fn reference_score(rating: StarRating) -> i8 {
    rating.reference_score()
}

/// Normalize and score every review with every registered backend.
///
/// Output order matches input order; `backend_scores` follows registry order.
pub fn score_reviews(reviews: &[Review], registry: &BackendRegistry) -> Vec<ScoredReview> {
    let start = Instant::now();

    let scored: Vec<ScoredReview> = reviews
        .par_iter()
        .map(|review| {
            let text = normalize(&review.raw_text);
            let backend_scores: ScoreVec = (0..registry.len())
                .map(|idx| review_score(&registry.score(idx, &text)))
                .collect();
            ScoredReview {
                review: review.clone(),
                star_score: reference_score(review.star_rating),
                backend_scores,
            }
        })
        .collect();

    for (idx, backend) in registry.backends().iter().enumerate() {
        if let Some(summary) = ScoreSummary::of(scored.iter().map(|s| s.backend_scores[idx])) {
            tracing::debug!(
                backend = %backend.info.id,
                scorer = backend.scorer.name(),
                min = summary.min,
                max = summary.max,
                mean = summary.mean,
                "backend score range"
            );
        }
    }
    tracing::info!(
        reviews = scored.len(),
        backends = registry.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "scored reviews"
    );

    scored
}

struct ScoreSummary {
    min: f64,
    max: f64,
    mean: f64,
}

impl ScoreSummary {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        (count > 0).then(|| Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use revlens_core::config::ScoringConfig;
    use revlens_core::traits::UnavailableInference;

    #[test]
    fn test_review_score_bounds() {
        assert_eq!(review_score(&SentimentDistribution::binary(1.0, 0.0)), 2.0);
        assert_eq!(review_score(&SentimentDistribution::binary(0.0, 1.0)), -2.0);
        assert_eq!(review_score(&SentimentDistribution::UNDECIDED), 0.0);
        let three = SentimentDistribution {
            positive: 0.5,
            negative: 0.25,
            neutral: Some(0.25),
        };
        assert!((review_score(&three) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reference_score_matches_rating() {
        for v in 1..=5 {
            let r = StarRating::new(v).unwrap();
            assert_eq!(reference_score(r) as i64, v - 3);
        }
    }

    #[test]
    fn test_score_reviews_shape_and_order() {
        let registry = BackendRegistry::from_config(
            &ScoringConfig::default(),
            Arc::new(UnavailableInference),
            512,
        );
        let reviews: Vec<Review> = (0..20)
            .map(|i| Review {
                facility_id: format!("F{}", i % 3),
                raw_text: if i % 5 == 0 { String::new() } else { format!("良い病院 {i}") },
                star_rating: StarRating::new(1 + i % 5).unwrap(),
            })
            .collect();

        let scored = score_reviews(&reviews, &registry);
        assert_eq!(scored.len(), reviews.len());
        for (s, r) in scored.iter().zip(&reviews) {
            assert_eq!(&s.review, r);
            assert_eq!(s.backend_scores.len(), 3);
            assert!(s.backend_scores.iter().all(|v| (-2.0..=2.0).contains(v)));
            if r.raw_text.is_empty() {
                assert!(s.backend_scores.iter().all(|v| *v == 0.0));
            }
        }
    }
}
