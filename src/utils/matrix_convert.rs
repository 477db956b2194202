//! Matrix conversion utilities.
//!
//! Covariance matrices are stored and exchanged as ndarray `Array2<f64>`;
//! decompositions (Cholesky, symmetric eigenvalues) are done with nalgebra.
//! These helpers move data between the two representations.

use nalgebra::DMatrix;
use ndarray::Array2;

use crate::error::{FlavorError, Result};

/// Convert an ndarray Array2 to a nalgebra DMatrix.
pub fn ndarray_to_nalgebra(arr: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(arr.nrows(), arr.ncols(), |i, j| arr[[i, j]])
}

/// Convert a nalgebra DMatrix to an ndarray Array2.
pub fn nalgebra_to_ndarray(mat: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((mat.nrows(), mat.ncols()), |(i, j)| mat[(i, j)])
}

/// Build an Array2 from nested rows.
///
/// # Errors
///
/// * `FlavorError::DimensionMismatch` if the rows have different lengths
pub fn rows_to_ndarray(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);

    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
        return Err(FlavorError::DimensionMismatch(format!(
            "row {} has {} entries, expected {}",
            i,
            row.len(),
            n_cols
        )));
    }

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| FlavorError::DimensionMismatch(e.to_string()))
}

/// Split an Array2 into nested rows.
pub fn ndarray_to_rows(arr: &Array2<f64>) -> Vec<Vec<f64>> {
    arr.outer_iter().map(|row| row.to_vec()).collect()
}
