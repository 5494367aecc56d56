//! Pearson correlation with a Student-t p-value, and MAE.

use revlens_core::errors::StatsError;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Correlation coefficient and two-sided p-value. Both NaN for a constant
/// series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub r: f64,
    pub p_value: f64,
}

impl Correlation {
    pub const UNDEFINED: Self = Self {
        r: f64::NAN,
        p_value: f64::NAN,
    };

    pub fn is_defined(&self) -> bool {
        !self.r.is_nan()
    }
}

/// Pearson r and its two-sided p-value under H0: ρ = 0.
///
/// Requires at least two paired observations. With exactly two the
/// p-value is 1. A constant series yields [`Correlation::UNDEFINED`].
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation, StatsError> {
    check_paired("pearson", x, y, 2)?;

    let Some(r) = pearson_r(x, y) else {
        return Ok(Correlation::UNDEFINED);
    };

    let n = x.len();
    let p_value = if n == 2 {
        1.0
    } else {
        two_sided_p(r, (n - 2) as f64)
    };
    Ok(Correlation { r, p_value })
}

/// Pearson r, or `None` when either series is constant or shorter than two.
///
/// Lengths are assumed equal; extra elements of the longer slice are ignored.
pub fn pearson_r(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 || is_constant(&x[..n]) || is_constant(&y[..n]) {
        return None;
    }

    let nf = n as f64;
    let mean_x = x[..n].iter().sum::<f64>() / nf;
    let mean_y = y[..n].iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    let r = (cov / denom).clamp(-1.0, 1.0);
    (!r.is_nan()).then_some(r)
}

/// Mean of `|a_i − b_i|`. Requires at least one pair.
pub fn mean_absolute_error(a: &[f64], b: &[f64]) -> Result<f64, StatsError> {
    check_paired("mae", a, b, 1)?;
    Ok(mae_unchecked(a, b))
}

pub(crate) fn mae_unchecked(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return f64::NAN;
    }
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum::<f64>() / n as f64
}

fn two_sided_p(r: f64, df: f64) -> f64 {
    let one_minus_r2 = 1.0 - r * r;
    if one_minus_r2 <= 0.0 {
        return 0.0;
    }
    let t = r * (df / one_minus_r2).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

fn check_paired(statistic: &'static str, a: &[f64], b: &[f64], required: usize) -> Result<(), StatsError> {
    if a.len() != b.len() {
        return Err(StatsError::LengthMismatch {
            statistic,
            left: a.len(),
            right: b.len(),
        });
    }
    if a.len() < required {
        return Err(StatsError::InsufficientData {
            statistic,
            required,
            actual: a.len(),
        });
    }
    Ok(())
}
