//! Keyword heuristic scorer.
//!
//! Base probabilities come from keyword presence plus a fixed per-backend
//! bias; a small perturbation derived from a stable hash of
//! `(text, backend_id)` keeps otherwise identical backends apart.

use revlens_core::config::BackendConfig;
use revlens_core::traits::SentimentScorer;
use revlens_core::types::collections::FxHashMap;
use revlens_core::types::SentimentDistribution;
use xxhash_rust::xxh3::Xxh3;

use super::keywords::{count_present, NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS};

/// Version of the perturbation hash. Bump if the hash input or seed changes.
pub const NOISE_HASH_VERSION: u32 = 1;

/// Fixed xxh3 seed for the perturbation hash.
const NOISE_SEED: u64 = 0x7265_766c_656e_7331; // "revlens1"

const BASE: f64 = 0.4;
const HIT_WEIGHT: f64 = 0.15;
const CROSS_WEIGHT: f64 = 0.10;
/// Peak-to-peak width of the perturbation (±0.05).
const NOISE_SPAN: f64 = 0.1;

/// Heuristic scorer with a bias table keyed by backend id.
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    biases: FxHashMap<String, f64>,
}

impl HeuristicScorer {
    pub fn new(biases: FxHashMap<String, f64>) -> Self {
        Self { biases }
    }

    pub fn from_backends(backends: &[BackendConfig]) -> Self {
        Self::new(backends.iter().map(|b| (b.id.clone(), b.bias)).collect())
    }

    /// Bias for a backend; unknown backends get 0.0.
    pub fn bias(&self, backend_id: &str) -> f64 {
        self.biases.get(backend_id).copied().unwrap_or(0.0)
    }
}

impl SentimentScorer for HeuristicScorer {
    fn score(&self, normalized_text: &str, backend_id: &str) -> SentimentDistribution {
        heuristic_distribution(normalized_text, backend_id, self.bias(backend_id))
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

/// Score `normalized_text` for `backend_id` with the given bias.
pub fn heuristic_distribution(
    normalized_text: &str,
    backend_id: &str,
    bias: f64,
) -> SentimentDistribution {
    if normalized_text.is_empty() {
        return SentimentDistribution::UNDECIDED;
    }

    let pos = count_present(normalized_text, POSITIVE_KEYWORDS) as f64;
    let neg = count_present(normalized_text, NEGATIVE_KEYWORDS) as f64;

    let base_positive = BASE + HIT_WEIGHT * pos - CROSS_WEIGHT * neg + bias;
    let base_negative = BASE + HIT_WEIGHT * neg - CROSS_WEIGHT * pos - bias;

    let total = base_positive + base_negative;
    let positive = if total > 0.0 { base_positive / total } else { 0.5 };

    let positive = (positive + perturbation(normalized_text, backend_id)).clamp(0.0, 1.0);
    SentimentDistribution::binary(positive, 1.0 - positive)
}

/// Deterministic perturbation in [-0.05, 0.05).
///
/// Stable across processes and platforms: xxh3-64 with a fixed seed over the
/// UTF-8 text, a unit separator, and the backend id.
pub fn perturbation(normalized_text: &str, backend_id: &str) -> f64 {
    let mut hasher = Xxh3::with_seed(NOISE_SEED);
    hasher.update(normalized_text.as_bytes());
    hasher.update(&[0x1f]);
    hasher.update(backend_id.as_bytes());
    let bucket = hasher.digest() % 1000;
    (bucket as f64 / 1000.0 - 0.5) * NOISE_SPAN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(d: &SentimentDistribution) {
        assert!((0.0..=1.0).contains(&d.positive));
        assert!((0.0..=1.0).contains(&d.negative));
        assert!((d.positive + d.negative - 1.0).abs() < 1e-12);
        assert!(d.neutral.is_none());
    }

    #[test]
    fn test_empty_text_is_undecided() {
        let scorer = HeuristicScorer::default();
        for backend in ["a", "b", ""] {
            assert_eq!(scorer.score("", backend), SentimentDistribution::UNDECIDED);
        }
    }

    #[test]
    fn test_no_keywords_is_half_plus_noise() {
        let text = "普通でした";
        let d = heuristic_distribution(text, "a", 0.0);
        assert_valid(&d);
        let expected = 0.5 + perturbation(text, "a");
        assert!((d.positive - expected).abs() < 1e-12);
    }

    #[test]
    fn test_positive_keywords_raise_positive() {
        let d = heuristic_distribution("先生が親切で丁寧、安心できる良い病院", "a", 0.0);
        assert_valid(&d);
        assert!(d.positive > 0.8, "got {}", d.positive);
    }

    #[test]
    fn test_negative_keywords_raise_negative() {
        let d = heuristic_distribution("待ち時間が長いし料金が高い、駐車場も狭い", "a", 0.0);
        assert_valid(&d);
        assert!(d.negative > 0.8, "got {}", d.negative);
    }

    #[test]
    fn test_exact_formula_one_each() {
        // pos = 1, neg = 1: both bases are 0.45, so positive = 0.5 before noise.
        let text = "良いけど高い";
        let d = heuristic_distribution(text, "x", 0.0);
        let expected = 0.5 + perturbation(text, "x");
        assert!((d.positive - expected).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_bias_is_clamped() {
        let skewed = heuristic_distribution("普通", "x", 5.0);
        assert_valid(&skewed);
        assert_eq!(skewed.positive, 1.0);
        assert_eq!(skewed.negative, 0.0);

        let skewed = heuristic_distribution("普通", "x", -5.0);
        assert_valid(&skewed);
        assert_eq!(skewed.positive, 0.0);
    }

    #[test]
    fn test_bias_separates_backends() {
        let mut biases = FxHashMap::default();
        biases.insert("up".to_string(), 0.1);
        biases.insert("down".to_string(), -0.05);
        let scorer = HeuristicScorer::new(biases);
        assert_eq!(scorer.bias("up"), 0.1);
        assert_eq!(scorer.bias("unknown"), 0.0);

        let text = "受付で待ちました";
        let up = scorer.score(text, "up");
        let base = 0.5 + 0.1 / 0.8;
        assert!((up.positive - (base + perturbation(text, "up"))).abs() < 1e-12);
    }

    #[test]
    fn test_perturbation_is_deterministic_and_bounded() {
        let a = perturbation("同じ文章", "backend");
        let b = perturbation("同じ文章", "backend");
        assert_eq!(a, b);
        for i in 0..200 {
            let p = perturbation(&format!("text {i}"), "backend");
            assert!((-0.05..0.05).contains(&p), "{p} out of range");
        }
    }

    #[test]
    fn test_perturbation_depends_on_backend() {
        let differs = (0..50).any(|i| {
            let text = format!("レビュー{i}");
            perturbation(&text, "a") != perturbation(&text, "b")
        });
        assert!(differs);
    }
}
