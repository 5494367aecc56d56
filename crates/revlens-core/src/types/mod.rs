//! Shared data model for the review pipeline.

pub mod collections;
pub mod review;

pub use review::{
    BackendInfo, FacilityAggregate, Review, ScoreVec, ScoredReview, SentimentDistribution,
    StarRating,
};
