//! Agreement between backend scores and star ratings.
//!
//! - `pearson`: correlation, two-sided p-value, mean absolute error
//! - `metrics`: per-backend performance metrics over facility aggregates
//! - `matrix`: inter-backend correlation matrix
//! - `ranking`: best backends by MAE
//! - `regression`: least-squares line of star score on backend score

pub mod matrix;
pub mod metrics;
pub mod pearson;
pub mod ranking;
pub mod regression;

pub use matrix::CorrelationMatrix;
pub use metrics::{MetricIssue, PerformanceEvaluator, PerformanceMetric};
pub use pearson::{mean_absolute_error, pearson, pearson_r, Correlation};
pub use ranking::{rank_by_mae, BackendRanking};
pub use regression::{linear_fit, LinearFit};
