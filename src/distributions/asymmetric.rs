//! Two-piece ("asymmetric") Gaussian distribution.
//!
//! Above the central value the width is `right_deviation`, below it
//! `left_deviation`. Each half carries probability one half, so the central
//! value is the median.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::PI;

use crate::error::{FlavorError, Result};

/// Two-piece normal distribution with separate upper and lower widths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsymmetricNormalDistribution {
    central_value: f64,
    right_deviation: f64,
    left_deviation: f64,
}

impl AsymmetricNormalDistribution {
    /// Create a two-piece normal distribution.
    ///
    /// # Errors
    ///
    /// `FlavorError::Validation` if either deviation is not strictly positive.
    pub fn new(central_value: f64, right_deviation: f64, left_deviation: f64) -> Result<Self> {
        if !central_value.is_finite() {
            return Err(FlavorError::Validation(format!(
                "asymmetric normal distribution requires a finite central value, got {}",
                central_value
            )));
        }
        for (side, deviation) in [("right", right_deviation), ("left", left_deviation)] {
            if !(deviation > 0.0 && deviation.is_finite()) {
                return Err(FlavorError::Validation(format!(
                    "{} deviation must be positive, got {}",
                    side, deviation
                )));
            }
        }
        Ok(Self {
            central_value,
            right_deviation,
            left_deviation,
        })
    }

    pub fn central_value(&self) -> f64 {
        self.central_value
    }

    pub fn right_deviation(&self) -> f64 {
        self.right_deviation
    }

    pub fn left_deviation(&self) -> f64 {
        self.left_deviation
    }

    fn deviation_at(&self, x: f64) -> f64 {
        if x >= self.central_value {
            self.right_deviation
        } else {
            self.left_deviation
        }
    }

    pub fn log_density(&self, x: f64) -> f64 {
        let sigma = self.deviation_at(x);
        let z = (x - self.central_value) / sigma;
        -0.5 * z * z - (sigma * (2.0 * PI).sqrt()).ln()
    }
}

impl Distribution<f64> for AsymmetricNormalDistribution {
    /// A symmetric standard-normal draw is scaled by the width of the side it
    /// falls on.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        let sigma = if z >= 0.0 {
            self.right_deviation
        } else {
            self.left_deviation
        };
        self.central_value + sigma * z
    }
}
