//! Statistical failures. Reported per metric; never abort the whole run.

use super::ErrorCode;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("{statistic} needs at least {required} observations, got {actual}")]
    InsufficientData {
        statistic: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("{statistic}: series lengths differ ({left} vs {right})")]
    LengthMismatch {
        statistic: &'static str,
        left: usize,
        right: usize,
    },

    #[error("{statistic}: all {iterations} resamples were degenerate")]
    DegenerateResamples {
        statistic: &'static str,
        iterations: usize,
    },

    #[error("aggregation called on zero reviews")]
    EmptyInput,
}

impl StatsError {
    /// True for the failures that mean "too little data to compute this".
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::DegenerateResamples { .. }
        )
    }
}

impl ErrorCode for StatsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "STATS_INSUFFICIENT_DATA",
            Self::LengthMismatch { .. } => "STATS_LENGTH_MISMATCH",
            Self::DegenerateResamples { .. } => "STATS_DEGENERATE_RESAMPLES",
            Self::EmptyInput => "STATS_EMPTY_INPUT",
        }
    }
}
