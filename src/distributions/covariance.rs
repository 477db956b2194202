//! # Covariance Matrix Construction
//!
//! Correlated parameter groups are declared with marginal errors and a
//! correlation matrix. This module turns those into a covariance matrix and
//! applies the one-shot positive-definiteness repair:
//!
//! 1. `covar = outer(errors, errors) * correl`
//! 2. if any eigenvalue of `covar` is `<= 0`, shrink the off-diagonal
//!    correlations once: `correl -> damping * (correl - I) + I`
//! 3. if the rebuilt matrix is still not positive definite, give up with
//!    [`FlavorError::DataIntegrity`].

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FlavorError, Result};
use crate::utils::ndarray_to_nalgebra;

/// Correlation matrix as written in a data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrelationSpec {
    /// The same correlation coefficient between every pair
    Uniform(f64),

    /// Full rows, upper-right rows where row `i` holds `n - i` entries, or
    /// lower-left rows where row `i` holds `i + 1` entries
    Rows(Vec<Vec<f64>>),
}

impl CorrelationSpec {
    /// Expand into a full, symmetric `n x n` correlation matrix
    ///
    /// # Errors
    ///
    /// * `FlavorError::DataIntegrity` if the number or length of rows is
    ///   inconsistent with `n`, if full and triangular rows are mixed, if a
    ///   full matrix is not symmetric, or if the completed matrix has
    ///   diagonal entries different from one.
    pub fn to_matrix(&self, n: usize) -> Result<Array2<f64>> {
        let rows = match self {
            Self::Uniform(rho) => {
                return Ok(Array2::from_shape_fn((n, n), |(i, j)| {
                    if i == j {
                        1.0
                    } else {
                        *rho
                    }
                }));
            }
            Self::Rows(rows) => rows,
        };

        if rows.len() != n {
            return Err(FlavorError::DataIntegrity(format!(
                "correlation matrix has {} rows for {} parameters",
                rows.len(),
                n
            )));
        }

        // Row 0 tells the layout apart: a single entry means lower-left rows
        let lower = n > 1 && rows.first().map_or(false, |row| row.len() == 1);

        let mut correl = Array2::<f64>::zeros((n, n));
        let mut full_rows = 0;
        let mut partial_rows = 0;
        for (i, row) in rows.iter().enumerate() {
            let partial = if lower { i + 1 } else { n - i };
            if row.len() == partial {
                // A triangle row spanning the whole width fits either layout
                if partial != n {
                    partial_rows += 1;
                }
                let offset = if lower { 0 } else { i };
                for (k, &value) in row.iter().enumerate() {
                    correl[[i, offset + k]] = value;
                }
            } else if row.len() == n {
                full_rows += 1;
                for (j, &value) in row.iter().enumerate() {
                    correl[[i, j]] = value;
                }
            } else {
                return Err(FlavorError::DataIntegrity(format!(
                    "correlation row {} has {} entries, expected {} or {}",
                    i,
                    row.len(),
                    n,
                    partial
                )));
            }
        }

        if full_rows > 0 && partial_rows > 0 {
            return Err(FlavorError::DataIntegrity(
                "correlation matrix mixes full and triangular rows".to_string(),
            ));
        }

        if partial_rows > 0 {
            // Only one triangle was given: M -> M + M^T - diag(M)
            let transposed = correl.t().to_owned();
            let diag = Array2::from_diag(&correl.diag());
            correl = &correl + &transposed - &diag;
        } else if !is_symmetric(&correl) {
            return Err(FlavorError::DataIntegrity(
                "correlation matrix is not symmetric".to_string(),
            ));
        }

        if correl.diag().iter().any(|&d| (d - 1.0).abs() > 1e-12) {
            return Err(FlavorError::DataIntegrity(
                "correlation matrix must have unit diagonal".to_string(),
            ));
        }

        Ok(correl)
    }
}

/// Check whether a square matrix is symmetric up to a relative tolerance.
pub fn is_symmetric(a: &Array2<f64>) -> bool {
    let n = a.nrows();
    if a.ncols() != n {
        return false;
    }
    for i in 0..n {
        for j in (i + 1)..n {
            let (x, y) = (a[[i, j]], a[[j, i]]);
            let scale = x.abs().max(y.abs()).max(f64::MIN_POSITIVE);
            if (x - y).abs() > 1e-10 * scale {
                return false;
            }
        }
    }
    true
}

/// Check whether a symmetric matrix has only strictly positive eigenvalues.
pub fn is_positive_definite(a: &Array2<f64>) -> bool {
    if a.nrows() == 0 || a.nrows() != a.ncols() {
        return false;
    }
    let eigen = ndarray_to_nalgebra(a).symmetric_eigen();
    eigen.eigenvalues.iter().all(|&ev| ev > 0.0)
}

/// Build `outer(errors, errors) * correl`.
pub fn covariance_from_correlation(errors: &[f64], correl: &Array2<f64>) -> Result<Array2<f64>> {
    let n = errors.len();
    if correl.shape() != &[n, n] {
        return Err(FlavorError::DimensionMismatch(format!(
            "correlation matrix shape {:?} doesn't match {} errors",
            correl.shape(),
            n
        )));
    }
    let errors = Array1::from(errors.to_vec());
    let outer = Array2::from_shape_fn((n, n), |(i, j)| errors[i] * errors[j]);
    Ok(outer * correl)
}

/// Shrink all off-diagonal correlations: `damping * (correl - I) + I`.
pub fn damp_correlation(correl: &Array2<f64>, damping: f64) -> Array2<f64> {
    let identity = Array2::<f64>::eye(correl.nrows());
    (correl - &identity) * damping + &identity
}

/// Build a positive-definite covariance matrix, damping the correlations once
/// if needed.
///
/// # Errors
///
/// * `FlavorError::DataIntegrity` if the covariance matrix is still not
///   positive definite after one damping pass.
pub fn repaired_covariance(
    errors: &[f64],
    correl: &Array2<f64>,
    damping: f64,
) -> Result<Array2<f64>> {
    let covar = covariance_from_correlation(errors, correl)?;
    if is_positive_definite(&covar) {
        return Ok(covar);
    }

    warn!(
        n = errors.len(),
        damping, "covariance matrix not positive definite, damping correlations"
    );
    let damped = damp_correlation(correl, damping);
    let covar = covariance_from_correlation(errors, &damped)?;
    if is_positive_definite(&covar) {
        Ok(covar)
    } else {
        Err(FlavorError::DataIntegrity(format!(
            "covariance matrix is not positive definite: {:?}",
            covar
        )))
    }
}

/// Calculate correlation matrix from covariance matrix.
///
/// The correlation matrix is calculated as:
///   correl[i,j] = covar[i,j] / sqrt(covar[i,i] * covar[j,j])
pub fn calculate_correlation(covar: &Array2<f64>) -> Array2<f64> {
    let n = covar.nrows();
    Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j {
            1.0
        } else {
            let denom = (covar[[i, i]] * covar[[j, j]]).sqrt();
            if denom > 0.0 {
                covar[[i, j]] / denom
            } else {
                0.0
            }
        }
    })
}

/// Extract standard errors from the covariance matrix.
///
/// Standard errors are the square roots of the diagonal elements
/// of the covariance matrix.
pub fn standard_errors_from_covariance(covar: &Array2<f64>) -> Array1<f64> {
    covar
        .diag()
        .mapv(|v| if v > 0.0 { v.sqrt() } else { 0.0 })
}
