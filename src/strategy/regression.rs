// src/strategy/regression.rs

//! Numerical helpers for the seasonal forecaster.
//!
//! The model is linear in its coefficients, so fitting reduces to a
//! ridge-regularised least-squares problem solved through the normal
//! equations `(XᵀX + Λ) β = Xᵀy`.

use crate::error::ForecastError;
use std::f64::consts::PI;

/// Period of the yearly seasonal component, in days.
pub const YEAR_DAYS: f64 = 365.25;

/// Fourier basis for a yearly cycle: `[sin(2π·1·d/P), cos(2π·1·d/P), ..]`.
pub fn fourier_terms(day: f64, order: usize) -> Vec<f64> {
    let mut terms = Vec::with_capacity(2 * order);
    for n in 1..=order {
        let angle = 2.0 * PI * n as f64 * day / YEAR_DAYS;
        terms.push(angle.sin());
        terms.push(angle.cos());
    }
    terms
}

/// Solves the ridge least-squares problem for the given design rows.
///
/// # Arguments
/// * `rows` - Design matrix, one row per observation.
/// * `targets` - Observed values, one per row.
/// * `penalties` - Diagonal ridge penalty per coefficient (0.0 = unpenalised).
pub fn ridge_least_squares(
    rows: &[Vec<f64>],
    targets: &[f64],
    penalties: &[f64],
) -> Result<Vec<f64>, ForecastError> {
    let p = penalties.len();
    let mut gram = vec![vec![0.0; p]; p];
    let mut rhs = vec![0.0; p];

    for (row, &y) in rows.iter().zip(targets) {
        for i in 0..p {
            rhs[i] += row[i] * y;
            for j in 0..=i {
                gram[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..p {
        gram[i][i] += penalties[i];
        for j in 0..i {
            gram[j][i] = gram[i][j];
        }
    }

    cholesky_solve(gram, &rhs)
}

/// Solves `A x = b` for symmetric positive-definite `A`.
fn cholesky_solve(a: Vec<Vec<f64>>, b: &[f64]) -> Result<Vec<f64>, ForecastError> {
    let n = b.len();
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let dot: f64 = (0..j).map(|k| l[i][k] * l[j][k]).sum();
            if i == j {
                let pivot = a[i][i] - dot;
                if pivot.is_nan() || pivot <= 1e-12 {
                    return Err(ForecastError::SingularSystem);
                }
                l[i][i] = pivot.sqrt();
            } else {
                l[i][j] = (a[i][j] - dot) / l[j][j];
            }
        }
    }

    // Forward substitution: L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let dot: f64 = (0..i).map(|k| l[i][k] * z[k]).sum();
        z[i] = (b[i] - dot) / l[i][i];
    }

    // Back substitution: Lᵀ x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let dot: f64 = (i + 1..n).map(|k| l[k][i] * x[k]).sum();
        x[i] = (z[i] - dot) / l[i][i];
    }

    if x.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::NonFinite);
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_an_exact_line() {
        let rows: Vec<Vec<f64>> = (0..10).map(|t| vec![1.0, t as f64]).collect();
        let targets: Vec<f64> = (0..10).map(|t| 3.0 + 2.0 * t as f64).collect();
        let beta = ridge_least_squares(&rows, &targets, &[0.0, 0.0]).unwrap();
        assert!((beta[0] - 3.0).abs() < 1e-9);
        assert!((beta[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_design_without_penalty_is_singular() {
        let rows: Vec<Vec<f64>> = (0..5).map(|_| vec![1.0, 1.0]).collect();
        let targets = vec![1.0; 5];
        assert_eq!(
            ridge_least_squares(&rows, &targets, &[0.0, 0.0]),
            Err(ForecastError::SingularSystem)
        );
        assert!(ridge_least_squares(&rows, &targets, &[0.1, 0.1]).is_ok());
    }

    #[test]
    fn fourier_terms_have_two_entries_per_order() {
        let terms = fourier_terms(0.0, 10);
        assert_eq!(terms.len(), 20);
        assert_eq!(terms[0], 0.0);
        assert_eq!(terms[1], 1.0);
    }
}
