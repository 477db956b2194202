//! # Probability Distributions
//!
//! The statistical content attached to parameters. Every variant can report
//! its central value and one-sigma errors, draw samples from an explicitly
//! passed random source, and evaluate its log-density.
//!
//! | Variant | Arguments | 1σ error |
//! |---|---|---|
//! | [`NormalDistribution`] | central, σ | σ |
//! | [`AsymmetricNormalDistribution`] | central, σ₊, σ₋ | (σ₊, σ₋) |
//! | [`MultivariateNormalDistribution`] | μ⃗, Σ | √Σᵢᵢ per component |
//! | [`UniformDistribution`] | central, half range | half range |
//! | [`DeltaDistribution`] | central | 0 |
//!
//! [`ProbabilityDistribution`] is the closed sum of these variants and
//! [`DistributionRecord`] its serialized, tagged form.

pub mod asymmetric;
pub mod covariance;
pub mod delta;
pub mod multivariate;
pub mod normal;
pub mod record;
pub mod uniform;

use rand::Rng;
use rand_distr::Distribution;

use crate::error::{FlavorError, Result};

pub use asymmetric::AsymmetricNormalDistribution;
pub use covariance::CorrelationSpec;
pub use delta::DeltaDistribution;
pub use multivariate::MultivariateNormalDistribution;
pub use normal::NormalDistribution;
pub use record::DistributionRecord;
pub use uniform::UniformDistribution;

/// Central value of a distribution
#[derive(Debug, Clone, PartialEq)]
pub enum CentralValue {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl CentralValue {
    /// The scalar value, if this is a univariate central value
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(x) => Some(*x),
            Self::Vector(_) => None,
        }
    }

    /// All components as a vector (length one for scalars)
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::Scalar(x) => vec![*x],
            Self::Vector(v) => v.clone(),
        }
    }
}

/// One-sigma error on a single parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OneSigmaError {
    Symmetric(f64),
    Asymmetric { upper: f64, lower: f64 },
}

impl OneSigmaError {
    pub fn upper(&self) -> f64 {
        match self {
            Self::Symmetric(e) => *e,
            Self::Asymmetric { upper, .. } => *upper,
        }
    }

    pub fn lower(&self) -> f64 {
        match self {
            Self::Symmetric(e) => *e,
            Self::Asymmetric { lower, .. } => *lower,
        }
    }

    /// Average of the upper and lower error
    pub fn mean(&self) -> f64 {
        0.5 * (self.upper() + self.lower())
    }
}

/// A probability distribution constraining one or more parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ProbabilityDistribution {
    Normal(NormalDistribution),
    AsymmetricNormal(AsymmetricNormalDistribution),
    MultivariateNormal(MultivariateNormalDistribution),
    Uniform(UniformDistribution),
    Delta(DeltaDistribution),
}

impl ProbabilityDistribution {
    /// Number of parameters the distribution is defined over
    pub fn dim(&self) -> usize {
        match self {
            Self::MultivariateNormal(d) => d.dim(),
            _ => 1,
        }
    }

    /// Serialization tag of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Normal(_) => "normal",
            Self::AsymmetricNormal(_) => "asymmetric_normal",
            Self::MultivariateNormal(_) => "multivariate_normal",
            Self::Uniform(_) => "uniform",
            Self::Delta(_) => "delta",
        }
    }

    pub fn central_value(&self) -> CentralValue {
        match self {
            Self::Normal(d) => CentralValue::Scalar(d.central_value()),
            Self::AsymmetricNormal(d) => CentralValue::Scalar(d.central_value()),
            Self::MultivariateNormal(d) => CentralValue::Vector(d.central_value().to_vec()),
            Self::Uniform(d) => CentralValue::Scalar(d.central_value()),
            Self::Delta(d) => CentralValue::Scalar(d.central_value()),
        }
    }

    /// One-sigma error for each component, in parameter order
    pub fn errors_1d(&self) -> Vec<OneSigmaError> {
        match self {
            Self::Normal(d) => vec![OneSigmaError::Symmetric(d.standard_deviation())],
            Self::AsymmetricNormal(d) => vec![OneSigmaError::Asymmetric {
                upper: d.right_deviation(),
                lower: d.left_deviation(),
            }],
            Self::MultivariateNormal(d) => d
                .standard_deviations()
                .into_iter()
                .map(OneSigmaError::Symmetric)
                .collect(),
            Self::Uniform(d) => vec![OneSigmaError::Symmetric(d.half_range())],
            Self::Delta(_) => vec![OneSigmaError::Symmetric(0.0)],
        }
    }

    /// Draw one joint sample (length [`dim`](Self::dim))
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        match self {
            Self::Normal(d) => vec![d.sample(rng)],
            Self::AsymmetricNormal(d) => vec![d.sample(rng)],
            Self::MultivariateNormal(d) => d.sample(rng),
            Self::Uniform(d) => vec![d.sample(rng)],
            Self::Delta(d) => vec![d.sample(rng)],
        }
    }

    /// Log-density at `x`.
    ///
    /// # Errors
    ///
    /// `FlavorError::DimensionMismatch` if `x.len()` differs from [`dim`](Self::dim).
    pub fn log_density(&self, x: &[f64]) -> Result<f64> {
        match self {
            Self::Normal(d) => Ok(d.log_density(single_value(x)?)),
            Self::AsymmetricNormal(d) => Ok(d.log_density(single_value(x)?)),
            Self::MultivariateNormal(d) => d.log_density(x),
            Self::Uniform(d) => Ok(d.log_density(single_value(x)?)),
            Self::Delta(d) => Ok(d.log_density(single_value(x)?)),
        }
    }
}

fn single_value(x: &[f64]) -> Result<f64> {
    match x {
        [value] => Ok(*value),
        _ => Err(FlavorError::DimensionMismatch(format!(
            "univariate distribution evaluated at {} values",
            x.len()
        ))),
    }
}

impl From<NormalDistribution> for ProbabilityDistribution {
    fn from(d: NormalDistribution) -> Self {
        Self::Normal(d)
    }
}

impl From<AsymmetricNormalDistribution> for ProbabilityDistribution {
    fn from(d: AsymmetricNormalDistribution) -> Self {
        Self::AsymmetricNormal(d)
    }
}

impl From<MultivariateNormalDistribution> for ProbabilityDistribution {
    fn from(d: MultivariateNormalDistribution) -> Self {
        Self::MultivariateNormal(d)
    }
}

impl From<UniformDistribution> for ProbabilityDistribution {
    fn from(d: UniformDistribution) -> Self {
        Self::Uniform(d)
    }
}

impl From<DeltaDistribution> for ProbabilityDistribution {
    fn from(d: DeltaDistribution) -> Self {
        Self::Delta(d)
    }
}
