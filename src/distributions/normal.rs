//! Symmetric Gaussian distribution.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::PI;

use crate::error::{FlavorError, Result};

/// Univariate normal distribution with central value μ and standard deviation σ
///
/// - log-density: `-0.5 * ((x - μ)/σ)² - ln(σ √(2π))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalDistribution {
    central_value: f64,
    standard_deviation: f64,
}

impl NormalDistribution {
    /// Create a normal distribution.
    ///
    /// # Errors
    ///
    /// `FlavorError::Validation` if the central value is not finite or the
    /// standard deviation is not strictly positive and finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use flavor_constraints::distributions::NormalDistribution;
    ///
    /// let m_b = NormalDistribution::new(4.18, 0.03).unwrap();
    /// assert_eq!(m_b.central_value(), 4.18);
    /// assert!(NormalDistribution::new(4.18, -0.03).is_err());
    /// ```
    pub fn new(central_value: f64, standard_deviation: f64) -> Result<Self> {
        if !central_value.is_finite() {
            return Err(FlavorError::Validation(format!(
                "normal distribution requires a finite central value, got {}",
                central_value
            )));
        }
        if !(standard_deviation > 0.0 && standard_deviation.is_finite()) {
            return Err(FlavorError::Validation(format!(
                "normal distribution requires a positive standard deviation, got {}",
                standard_deviation
            )));
        }
        Ok(Self {
            central_value,
            standard_deviation,
        })
    }

    pub fn central_value(&self) -> f64 {
        self.central_value
    }

    pub fn standard_deviation(&self) -> f64 {
        self.standard_deviation
    }

    pub fn log_density(&self, x: f64) -> f64 {
        let z = (x - self.central_value) / self.standard_deviation;
        -0.5 * z * z - (self.standard_deviation * (2.0 * PI).sqrt()).ln()
    }
}

impl Distribution<f64> for NormalDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        self.central_value + self.standard_deviation * z
    }
}
