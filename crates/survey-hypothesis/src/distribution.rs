//! Tail probabilities of the reference distributions

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};
use statrs::function::beta::beta_reg;
use statrs::function::gamma::gamma_ur;
use survey_core::{Error, Result};

/// Upper tail of the chi-square distribution, P(X >= x)
pub fn chi_square_sf(x: f64, dof: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 1.0;
    }
    if x.is_infinite() {
        return 0.0;
    }
    gamma_ur(dof / 2.0, x / 2.0)
}

/// Two-sided p-value of a t statistic
pub fn t_two_sided(t: f64, df: f64) -> Result<f64> {
    if t.is_nan() {
        return Ok(f64::NAN);
    }
    let t_dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
        Error::InvalidInput(format!("Failed to create t-distribution: {e}"))
    })?;
    Ok((2.0 * t_dist.cdf(-t.abs())).min(1.0))
}

/// Upper tail of the F distribution, P(X >= f)
pub fn f_sf(f: f64, d1: f64, d2: f64) -> f64 {
    if f.is_nan() {
        return f64::NAN;
    }
    if f <= 0.0 {
        return 1.0;
    }
    if f.is_infinite() {
        return 0.0;
    }
    beta_reg(d2 / 2.0, d1 / 2.0, d2 / (d2 + d1 * f))
}

/// Two-sided p-value of a standard normal statistic
pub fn normal_two_sided(z: f64) -> Result<f64> {
    if z.is_nan() {
        return Ok(f64::NAN);
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| {
        Error::InvalidInput(format!("Failed to create normal distribution: {e}"))
    })?;
    Ok((2.0 * normal.cdf(-z.abs())).min(1.0))
}
