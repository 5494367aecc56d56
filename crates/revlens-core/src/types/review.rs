//! Reviews, sentiment distributions, and facility aggregates.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Per-backend scores, aligned with the run's backend order.
pub type ScoreVec = SmallVec<[f64; 4]>;

/// A validated 1–5 star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// `None` when the value lies outside [1, 5].
    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Signed reference score in {-2, -1, 0, 1, 2}.
    pub fn reference_score(self) -> i8 {
        self.0 as i8 - 3
    }
}

impl TryFrom<u8> for StarRating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i64).ok_or_else(|| format!("star rating {value} outside 1..=5"))
    }
}

impl From<StarRating> for u8 {
    fn from(rating: StarRating) -> Self {
        rating.0
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ingested review. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub facility_id: String,
    /// Raw text as supplied; empty when the cell was missing.
    pub raw_text: String,
    pub star_rating: StarRating,
}

/// Class probabilities for one (review, backend) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutral: Option<f64>,
}

impl SentimentDistribution {
    /// The 0.5/0.5 distribution returned for text with no analyzable content.
    pub const UNDECIDED: Self = Self {
        positive: 0.5,
        negative: 0.5,
        neutral: None,
    };

    pub fn binary(positive: f64, negative: f64) -> Self {
        Self {
            positive,
            negative,
            neutral: None,
        }
    }

    pub fn total(&self) -> f64 {
        self.positive + self.negative + self.neutral.unwrap_or(0.0)
    }
}

/// Identity of a backend as it appears in results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackendInfo {
    pub id: String,
    pub display_name: String,
}

/// A review with its reference score and one score per backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredReview {
    pub review: Review,
    /// `star_rating - 3`.
    pub star_score: i8,
    /// Review scores in [-2, 2], aligned with the run's backend order.
    pub backend_scores: ScoreVec,
}

impl ScoredReview {
    pub fn facility_id(&self) -> &str {
        &self.review.facility_id
    }
}

/// Per-facility means over all of its reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityAggregate {
    pub facility_id: String,
    pub review_count: usize,
    pub mean_star_score: f64,
    /// Mean review score per backend, aligned with the run's backend order.
    pub mean_backend_scores: ScoreVec,
}
