//! Pairwise correlation between backends' facility-level scores.

use revlens_core::types::{BackendInfo, FacilityAggregate};
use serde::{Deserialize, Serialize};

use super::pearson::pearson_r;
use crate::aggregation::backend_series;

/// Square matrix of Pearson r between backends. The diagonal is 1; an
/// undefined off-diagonal entry is NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub backend_ids: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn compute(aggregates: &[FacilityAggregate], backends: &[BackendInfo]) -> Self {
        let series: Vec<Vec<f64>> = (0..backends.len())
            .map(|idx| backend_series(aggregates, idx))
            .collect();

        let n = backends.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let r = pearson_r(&series[i], &series[j]).unwrap_or(f64::NAN);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self {
            backend_ids: backends.iter().map(|b| b.id.clone()).collect(),
            values,
        }
    }

    /// Correlation between two backends by id.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.backend_ids.iter().position(|id| id == a)?;
        let j = self.backend_ids.iter().position(|id| id == b)?;
        Some(self.values[i][j])
    }
}
