//! Point mass: a parameter known exactly.

use rand::Rng;
use rand_distr::Distribution;

use crate::error::{FlavorError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaDistribution {
    central_value: f64,
}

impl DeltaDistribution {
    pub fn new(central_value: f64) -> Result<Self> {
        if !central_value.is_finite() {
            return Err(FlavorError::Validation(format!(
                "delta distribution requires a finite value, got {}",
                central_value
            )));
        }
        Ok(Self { central_value })
    }

    pub fn central_value(&self) -> f64 {
        self.central_value
    }

    pub fn log_density(&self, x: f64) -> f64 {
        if x == self.central_value {
            0.0
        } else {
            f64::NEG_INFINITY
        }
    }
}

impl Distribution<f64> for DeltaDistribution {
    fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> f64 {
        self.central_value
    }
}
