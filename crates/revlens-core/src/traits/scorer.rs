//! The sentiment scoring capability.

use crate::types::SentimentDistribution;

/// Maps normalized text to a class distribution for one backend.
///
/// Implementations must be total: empty text yields
/// [`SentimentDistribution::UNDECIDED`] and no failure reaches the caller.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, normalized_text: &str, backend_id: &str) -> SentimentDistribution;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
