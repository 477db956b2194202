//! Multivariate normal distribution.
//!
//! The covariance matrix is validated at construction (square, symmetric,
//! positive definite) and its lower Cholesky factor `L` is cached, so that
//! sampling is `μ + L z` and the log-density needs one triangular solve.

use nalgebra::{DMatrix, DVector};
use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::PI;

use crate::distributions::covariance::{
    calculate_correlation, is_positive_definite, is_symmetric, standard_errors_from_covariance,
};
use crate::error::{FlavorError, Result};
use crate::utils::{nalgebra_to_ndarray, ndarray_to_nalgebra};

/// Joint Gaussian over several parameters
#[derive(Debug, Clone, PartialEq)]
pub struct MultivariateNormalDistribution {
    central_value: Vec<f64>,
    covariance: Array2<f64>,
    cholesky: DMatrix<f64>,
    log_det: f64,
}

impl MultivariateNormalDistribution {
    /// Create a multivariate normal distribution.
    ///
    /// # Errors
    ///
    /// * `FlavorError::Validation` if the covariance is not square, does not
    ///   match the central value's length, or is not symmetric
    /// * `FlavorError::DataIntegrity` if the covariance is not positive definite
    ///
    /// # Examples
    ///
    /// ```
    /// use flavor_constraints::distributions::MultivariateNormalDistribution;
    /// use ndarray::arr2;
    ///
    /// let dist = MultivariateNormalDistribution::new(
    ///     vec![1.0, 2.0],
    ///     arr2(&[[0.01, 0.018], [0.018, 0.04]]),
    /// ).unwrap();
    /// assert_eq!(dist.dim(), 2);
    ///
    /// let singular = arr2(&[[1.0, 1.0], [1.0, 1.0]]);
    /// assert!(MultivariateNormalDistribution::new(vec![0.0, 0.0], singular).is_err());
    /// ```
    pub fn new(central_value: Vec<f64>, covariance: Array2<f64>) -> Result<Self> {
        let n = central_value.len();
        if n == 0 {
            return Err(FlavorError::Validation(
                "multivariate normal distribution needs at least one dimension".to_string(),
            ));
        }
        if covariance.nrows() != covariance.ncols() {
            return Err(FlavorError::Validation(format!(
                "covariance matrix must be square, got shape {:?}",
                covariance.shape()
            )));
        }
        if covariance.nrows() != n {
            return Err(FlavorError::Validation(format!(
                "covariance matrix shape {:?} doesn't match central value of length {}",
                covariance.shape(),
                n
            )));
        }
        if central_value.iter().any(|c| !c.is_finite()) {
            return Err(FlavorError::Validation(
                "central values must be finite".to_string(),
            ));
        }
        if !is_symmetric(&covariance) {
            return Err(FlavorError::Validation(
                "covariance matrix must be symmetric".to_string(),
            ));
        }
        if !is_positive_definite(&covariance) {
            return Err(FlavorError::DataIntegrity(format!(
                "covariance matrix is not positive definite: {:?}",
                covariance
            )));
        }

        let cholesky = ndarray_to_nalgebra(&covariance)
            .cholesky()
            .ok_or_else(|| {
                FlavorError::DataIntegrity("Cholesky decomposition of covariance failed".to_string())
            })?
            .unpack();
        let log_det = 2.0 * cholesky.diagonal().iter().map(|d| d.ln()).sum::<f64>();

        Ok(Self {
            central_value,
            covariance,
            cholesky,
            log_det,
        })
    }

    pub fn dim(&self) -> usize {
        self.central_value.len()
    }

    pub fn central_value(&self) -> &[f64] {
        &self.central_value
    }

    pub fn covariance(&self) -> &Array2<f64> {
        &self.covariance
    }

    /// Lower Cholesky factor `L` of the covariance, `Σ = L Lᵀ`
    pub fn cholesky_factor(&self) -> Array2<f64> {
        nalgebra_to_ndarray(&self.cholesky)
    }

    /// Correlation matrix derived from the covariance
    pub fn correlation(&self) -> Array2<f64> {
        calculate_correlation(&self.covariance)
    }

    /// Marginal standard deviations (square roots of the covariance diagonal)
    pub fn standard_deviations(&self) -> Vec<f64> {
        standard_errors_from_covariance(&self.covariance).to_vec()
    }

    /// Log-density at `x`.
    ///
    /// # Errors
    ///
    /// `FlavorError::DimensionMismatch` if `x` has the wrong length.
    pub fn log_density(&self, x: &[f64]) -> Result<f64> {
        let n = self.dim();
        if x.len() != n {
            return Err(FlavorError::DimensionMismatch(format!(
                "expected {} values, got {}",
                n,
                x.len()
            )));
        }
        let diff = DVector::from_iterator(
            n,
            x.iter().zip(&self.central_value).map(|(xi, mu)| xi - mu),
        );
        let y = self.cholesky.solve_lower_triangular(&diff).ok_or_else(|| {
            FlavorError::DataIntegrity("singular Cholesky factor".to_string())
        })?;
        Ok(-0.5 * y.norm_squared() - 0.5 * self.log_det - 0.5 * n as f64 * (2.0 * PI).ln())
    }
}

impl Distribution<Vec<f64>> for MultivariateNormalDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let n = self.dim();
        let z = DVector::from_fn(n, |_, _| rng.sample::<f64, _>(StandardNormal));
        let correlated = &self.cholesky * z;
        self.central_value
            .iter()
            .zip(correlated.iter())
            .map(|(mu, dx)| mu + dx)
            .collect()
    }
}
