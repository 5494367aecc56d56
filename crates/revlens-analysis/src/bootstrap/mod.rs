//! Bootstrap resampling for correlation intervals and paired MAE tests.
//!
//! Every iteration seeds its own RNG from `(seed, iteration)`, so results do
//! not depend on how rayon schedules the work.

pub mod engine;
pub mod percentile;
pub mod resample;
pub mod types;

pub use engine::BootstrapEngine;
pub use percentile::percentile;
pub use types::{BootstrapResult, MaeDifferenceResult};
