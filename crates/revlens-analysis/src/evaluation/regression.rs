//! Ordinary least-squares line.

use revlens_core::errors::StatsError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `y = slope·x + intercept`. A constant `x` yields NaN coefficients.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<LinearFit, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            statistic: "linear_fit",
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(StatsError::InsufficientData {
            statistic: "linear_fit",
            required: 2,
            actual: x.len(),
        });
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let (sxy, sxx) = x.iter().zip(y).fold((0.0, 0.0), |(sxy, sxx), (xi, yi)| {
        let dx = xi - mean_x;
        (sxy + dx * (yi - mean_y), sxx + dx * dx)
    });

    if sxx == 0.0 {
        return Ok(LinearFit {
            slope: f64::NAN,
            intercept: f64::NAN,
        });
    }
    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}
