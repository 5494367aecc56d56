//! Backend ranking by mean absolute error.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::metrics::PerformanceMetric;

/// Best and runner-up backends by MAE (lower is better).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendRanking {
    /// Backend ids ordered by ascending MAE. NaN sorts last; ties keep
    /// backend order.
    pub order: Vec<String>,
}

impl BackendRanking {
    pub fn best(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    pub fn second_best(&self) -> Option<&str> {
        self.order.get(1).map(String::as_str)
    }
}

pub fn rank_by_mae(metrics: &[PerformanceMetric]) -> BackendRanking {
    let mut ranked: Vec<&PerformanceMetric> = metrics.iter().collect();
    ranked.sort_by(|a, b| match (a.mae.is_nan(), b.mae.is_nan()) {
        (false, false) => a.mae.partial_cmp(&b.mae).unwrap_or(Ordering::Equal),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    });
    BackendRanking {
        order: ranked.into_iter().map(|m| m.backend_id.clone()).collect(),
    }
}
