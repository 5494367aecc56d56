//! Property tests for the heuristic scorer and review scores.

use proptest::prelude::*;
use revlens_analysis::scoring::review_score;
use revlens_analysis::sentiment::heuristic::{heuristic_distribution, perturbation};
use revlens_analysis::text::normalize;
use revlens_core::types::{SentimentDistribution, StarRating};

proptest! {
    #[test]
    fn distribution_is_valid(text in "\\PC{0,60}", backend in "[a-z/\\-]{1,20}", bias in -0.5f64..0.5) {
        let normalized = normalize(&text);
        let d = heuristic_distribution(&normalized, &backend, bias);
        prop_assert!((0.0..=1.0).contains(&d.positive));
        prop_assert!((0.0..=1.0).contains(&d.negative));
        prop_assert!((d.total() - 1.0).abs() < 1e-9);
        prop_assert!((-2.0..=2.0).contains(&review_score(&d)));
    }

    #[test]
    fn scoring_is_deterministic(text in "\\PC{1,40}", backend in "[a-z]{1,10}") {
        let a = heuristic_distribution(&text, &backend, 0.1);
        let b = heuristic_distribution(&text, &backend, 0.1);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn perturbation_is_bounded(text in "\\PC{0,40}", backend in "[a-z]{1,10}") {
        let p = perturbation(&text, &backend);
        prop_assert!((-0.05..0.05).contains(&p));
    }

    #[test]
    fn empty_text_is_undecided(backend in "[a-z]{0,10}", bias in -1.0f64..1.0) {
        prop_assert_eq!(heuristic_distribution("", &backend, bias), SentimentDistribution::UNDECIDED);
    }

    #[test]
    fn reference_score_range(rating in 1i64..=5) {
        let score = StarRating::new(rating).unwrap().reference_score();
        prop_assert!((-2..=2).contains(&score));
        prop_assert_eq!(score as i64, rating - 3);
    }
}
