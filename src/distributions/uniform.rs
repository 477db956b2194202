//! Flat distribution on `[central - half_range, central + half_range]`.

use rand::Rng;
use rand_distr::Distribution;

use crate::error::{FlavorError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformDistribution {
    central_value: f64,
    half_range: f64,
}

impl UniformDistribution {
    /// # Errors
    ///
    /// `FlavorError::Validation` if `half_range` is not strictly positive.
    pub fn new(central_value: f64, half_range: f64) -> Result<Self> {
        if !central_value.is_finite() || !(half_range > 0.0 && half_range.is_finite()) {
            return Err(FlavorError::Validation(format!(
                "uniform distribution requires a finite centre and positive half range, got {} and {}",
                central_value, half_range
            )));
        }
        Ok(Self {
            central_value,
            half_range,
        })
    }

    pub fn central_value(&self) -> f64 {
        self.central_value
    }

    pub fn half_range(&self) -> f64 {
        self.half_range
    }

    pub fn lower(&self) -> f64 {
        self.central_value - self.half_range
    }

    pub fn upper(&self) -> f64 {
        self.central_value + self.half_range
    }

    pub fn log_density(&self, x: f64) -> f64 {
        if (self.lower()..=self.upper()).contains(&x) {
            -(2.0 * self.half_range).ln()
        } else {
            f64::NEG_INFINITY
        }
    }
}

impl Distribution<f64> for UniformDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.lower()..self.upper())
    }
}
