//! Serialized form of [`ProbabilityDistribution`].
//!
//! A record is a tagged map: the `distribution` key selects the variant and
//! the remaining keys are that variant's constructor arguments, e.g.
//!
//! ```yaml
//! distribution: asymmetric_normal
//! central_value: 5.27
//! right_deviation: 0.02
//! left_deviation: 0.01
//! ```
//!
//! Converting a record back into a distribution re-runs the constructor's
//! validation.

use serde::{Deserialize, Serialize};

use crate::distributions::{
    AsymmetricNormalDistribution, DeltaDistribution, MultivariateNormalDistribution,
    NormalDistribution, ProbabilityDistribution, UniformDistribution,
};
use crate::error::{FlavorError, Result};
use crate::utils::{ndarray_to_rows, rows_to_ndarray};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "distribution", rename_all = "snake_case")]
pub enum DistributionRecord {
    Normal {
        central_value: f64,
        standard_deviation: f64,
    },
    AsymmetricNormal {
        central_value: f64,
        right_deviation: f64,
        left_deviation: f64,
    },
    MultivariateNormal {
        central_value: Vec<f64>,
        covariance: Vec<Vec<f64>>,
    },
    Uniform {
        central_value: f64,
        half_range: f64,
    },
    Delta {
        central_value: f64,
    },
}

impl From<&ProbabilityDistribution> for DistributionRecord {
    fn from(dist: &ProbabilityDistribution) -> Self {
        match dist {
            ProbabilityDistribution::Normal(d) => Self::Normal {
                central_value: d.central_value(),
                standard_deviation: d.standard_deviation(),
            },
            ProbabilityDistribution::AsymmetricNormal(d) => Self::AsymmetricNormal {
                central_value: d.central_value(),
                right_deviation: d.right_deviation(),
                left_deviation: d.left_deviation(),
            },
            ProbabilityDistribution::MultivariateNormal(d) => Self::MultivariateNormal {
                central_value: d.central_value().to_vec(),
                covariance: ndarray_to_rows(d.covariance()),
            },
            ProbabilityDistribution::Uniform(d) => Self::Uniform {
                central_value: d.central_value(),
                half_range: d.half_range(),
            },
            ProbabilityDistribution::Delta(d) => Self::Delta {
                central_value: d.central_value(),
            },
        }
    }
}

impl TryFrom<DistributionRecord> for ProbabilityDistribution {
    type Error = FlavorError;

    fn try_from(record: DistributionRecord) -> Result<Self> {
        Ok(match record {
            DistributionRecord::Normal {
                central_value,
                standard_deviation,
            } => NormalDistribution::new(central_value, standard_deviation)?.into(),
            DistributionRecord::AsymmetricNormal {
                central_value,
                right_deviation,
                left_deviation,
            } => AsymmetricNormalDistribution::new(central_value, right_deviation, left_deviation)?
                .into(),
            DistributionRecord::MultivariateNormal {
                central_value,
                covariance,
            } => {
                let covariance = rows_to_ndarray(&covariance)
                    .map_err(|e| FlavorError::Validation(e.to_string()))?;
                MultivariateNormalDistribution::new(central_value, covariance)?.into()
            }
            DistributionRecord::Uniform {
                central_value,
                half_range,
            } => UniformDistribution::new(central_value, half_range)?.into(),
            DistributionRecord::Delta { central_value } => {
                DeltaDistribution::new(central_value)?.into()
            }
        })
    }
}
